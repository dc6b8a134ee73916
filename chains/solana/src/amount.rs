use connectd_types::Amount;

/// Decimal places of the lamport-to-SOL conversion.
pub const LAMPORT_DECIMALS: u8 = 9;

/// Renders a lamport value as a decimal SOL string.
pub fn format_lamports(lamports: u64) -> String {
    Amount::from_smallest_unit(lamports as u128, LAMPORT_DECIMALS).to_string()
}

/// Renders a signed lamport delta as a decimal SOL string.
///
/// Balance deltas are signed: the second account key of a transfer gains
/// lamports, but fee payers and senders lose them.
pub fn format_lamport_delta(delta: i128) -> String {
    let rendered = Amount::from_smallest_unit(delta.unsigned_abs(), LAMPORT_DECIMALS).to_string();
    if delta < 0 {
        format!("-{rendered}")
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lamports() {
        assert_eq!(format_lamports(1_000_000_000), "1.0");
        assert_eq!(format_lamports(1), "0.000000001");
        assert_eq!(format_lamports(0), "0.0");
    }

    #[test]
    fn test_format_lamport_delta() {
        assert_eq!(format_lamport_delta(500_000_000), "0.5");
        assert_eq!(format_lamport_delta(-500_000_000), "-0.5");
        assert_eq!(format_lamport_delta(0), "0.0");
    }
}
