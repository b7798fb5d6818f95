//! Fixed-point monetary amounts.
//!
//! Every balance and transaction amount in the ledger is a [`Money`]: a
//! non-negative decimal carried at exactly two fractional digits. Amounts
//! cross serialization boundaries as decimal strings (never binary floats),
//! via `rust_decimal`'s string serde.

use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when constructing a [`Money`] value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),

    #[error("amount has more than 2 fractional digits: {0}")]
    Precision(Decimal),

    #[error("amount is not a valid decimal: {0}")]
    Malformed(String),
}

/// A non-negative decimal amount, normalized to 2 fractional digits at rest.
///
/// # Invariants
/// - the inner value is always `>= 0`
/// - the inner scale is always exactly 2 (so `Display` yields e.g. `150.00`)
///
/// Both are enforced by the constructors; arithmetic goes through checked
/// operations that preserve them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Create a `Money` from a raw decimal.
    ///
    /// Rejects negative values and values that cannot be represented with two
    /// fractional digits (trailing zeros beyond two are fine, `0.125` is not).
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative(value));
        }
        let trimmed = value.normalize();
        if trimmed.scale() > 2 {
            return Err(MoneyError::Precision(value));
        }
        let mut at_rest = trimmed;
        at_rest.rescale(2);
        Ok(Self(at_rest))
    }

    /// Zero, at rest scale.
    pub fn zero() -> Self {
        Self(Decimal::new(0, 2))
    }

    /// Convenience constructor from whole minor units (cents).
    pub fn from_minor_units(cents: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(cents, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition; `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction; `None` if the result would be negative (or on
    /// underflow), so a balance can never silently go below zero.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        let result = self.0.checked_sub(other.0)?;
        if result.is_sign_negative() && !result.is_zero() {
            None
        } else {
            Some(Self(result))
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|e| MoneyError::Malformed(format!("{s}: {e}")))?;
        Self::new(value)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(matches!("-5.00".parse::<Money>(), Err(MoneyError::Negative(_))));
    }

    #[test]
    fn excess_precision_is_rejected() {
        assert!(matches!("0.125".parse::<Money>(), Err(MoneyError::Precision(_))));
    }

    #[test]
    fn trailing_zeros_beyond_two_digits_are_accepted() {
        let m: Money = "50.1000".parse().unwrap();
        assert_eq!(m.to_string(), "50.10");
    }

    #[test]
    fn amounts_rest_at_two_fractional_digits() {
        let m: Money = "100".parse().unwrap();
        assert_eq!(m.to_string(), "100.00");
        assert_eq!(m.amount().scale(), 2);
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let a: Money = "10.00".parse().unwrap();
        let b: Money = "10.01".parse().unwrap();
        assert_eq!(a.checked_sub(b), None);
        assert_eq!(b.checked_sub(a).unwrap().to_string(), "0.01");
    }

    #[test]
    fn serializes_as_decimal_string() {
        let m: Money = "42.50".parse().unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"42.50\"");
        let back: Money = serde_json::from_str("\"42.50\"").unwrap();
        assert_eq!(back, m);
    }
}
