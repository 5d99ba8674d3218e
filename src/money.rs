//! Money
//!
//! Prices are whole tomans held in `u64`; there are no minor units in the shop.

use std::fmt;

/// A toman amount formatted with thousands separators, e.g. `200,000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Toman(pub u64);

impl From<u64> for Toman {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Toman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let len = digits.len();

        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (len - index) % 3 == 0 {
                f.write_str(",")?;
            }

            write!(f, "{digit}")?;
        }

        Ok(())
    }
}
