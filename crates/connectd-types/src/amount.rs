use std::fmt;

use serde::{Deserialize, Serialize};

/// A native-unit amount in a chain's smallest denomination.
///
/// Wraps the smallest unit of a currency (wei, lamport) together with the
/// number of decimal places of its display unit. `Display` renders the exact
/// decimal value; the fractional part keeps at least one digit, so zero
/// renders as `"0.0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Value in the smallest unit of the currency.
    pub value: u128,
    /// Decimal places of the display unit (18 for ETH, 9 for SOL).
    pub decimals: u8,
}

impl Amount {
    /// Creates an amount from a smallest-unit value.
    pub fn from_smallest_unit(value: u128, decimals: u8) -> Self {
        Self { value, decimals }
    }

    /// Zero with the given decimals.
    pub fn zero(decimals: u8) -> Self {
        Self { value: 0, decimals }
    }

    /// True when the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.value);
        }
        let scale = 10u128.pow(self.decimals as u32);
        let whole = self.value / scale;
        let frac = self.value % scale;
        let mut frac_digits = format!("{frac:0width$}", width = self.decimals as usize);
        while frac_digits.len() > 1 && frac_digits.ends_with('0') {
            frac_digits.pop();
        }
        write!(f, "{whole}.{frac_digits}")
    }
}
