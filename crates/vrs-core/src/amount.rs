//! # Monetary Amounts
//!
//! Non-negative integer amounts in the smallest currency unit. Floats are
//! never used for money; parsing rejects fractional or signed input rather
//! than silently truncating, which could mask data corruption or lead to
//! incorrect settlement.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A monetary amount in the smallest currency unit.
///
/// Non-negative by construction. Arithmetic is checked: additions that would
/// overflow return [`ValidationError::AmountOverflow`] instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a raw smallest-unit value.
    pub fn new(units: u128) -> Self {
        Self(units)
    }

    /// Parse an amount from a decimal string of smallest units.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAmount`] for empty, signed,
    /// fractional, or otherwise non-integer input.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidAmount(s.to_string()))
    }

    /// The raw smallest-unit value.
    pub fn units(&self) -> u128 {
        self.0
    }

    /// Whether this is the zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmountOverflow`] if the sum exceeds the
    /// representable range.
    pub fn checked_add(self, other: Self) -> Result<Self, ValidationError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(ValidationError::AmountOverflow {
                lhs: self.0.to_string(),
                rhs: other.0.to_string(),
            })
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_valid() {
        assert_eq!(Amount::parse("0").unwrap(), Amount::ZERO);
        assert_eq!(Amount::parse("12345").unwrap().units(), 12345);
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("-100").is_err());
        assert!(Amount::parse("12.34").is_err());
        assert!(Amount::parse("abc").is_err());
    }

    #[test]
    fn checked_add_sums() {
        let a = Amount::new(100);
        let b = Amount::new(50);
        assert_eq!(a.checked_add(b).unwrap().units(), 150);
    }

    #[test]
    fn checked_add_overflow() {
        let max = Amount::new(u128::MAX);
        assert!(max.checked_add(Amount::new(1)).is_err());
    }

    #[test]
    fn zero_is_zero() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn display_is_decimal() {
        assert_eq!(format!("{}", Amount::new(9900)), "9900");
    }

    proptest! {
        #[test]
        fn parse_display_roundtrip(units in 0u128..1_000_000_000_000) {
            let amount = Amount::new(units);
            prop_assert_eq!(Amount::parse(&format!("{amount}")).unwrap(), amount);
        }
    }
}
