use connectd_types::Amount;

/// Decimal places of the wei-to-native conversion shared by EVM chains.
pub const WEI_DECIMALS: u8 = 18;

/// Renders a wei value as a decimal string in the native unit.
pub fn format_wei(wei: u128) -> String {
    Amount::from_smallest_unit(wei, WEI_DECIMALS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wei() {
        assert_eq!(format_wei(1_000_000_000_000_000_000), "1.0");
        assert_eq!(format_wei(250_000_000_000_000_000), "0.25");
        assert_eq!(format_wei(0), "0.0");
    }
}
