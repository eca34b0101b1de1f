use crate::error::{HotelError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative monetary value.
///
/// Wraps `rust_decimal::Decimal` so that prices, discounts and redemption
/// values never go through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(HotelError::InvalidAmount(format!(
                "amount cannot be negative: {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The value rounded to cents, always carrying two decimal places.
    pub fn rounded(&self) -> Decimal {
        let mut cents = self.0.round_dp(2);
        cents.rescale(2);
        cents
    }

    /// Adds `rhs`, returning `None` if the sum exceeds the `Decimal` range.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtracts `rhs`, failing instead of going below zero.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        if rhs.0 > self.0 {
            None
        } else {
            Some(Self(self.0 - rhs.0))
        }
    }
}

impl TryFrom<Decimal> for Money {
    type Error = HotelError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.rounded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_validation() {
        assert!(Money::new(dec!(0.0)).is_ok());
        assert!(Money::new(dec!(12.5)).is_ok());
        assert!(matches!(
            Money::new(dec!(-0.01)),
            Err(HotelError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(10.0)).unwrap();
        let b = Money::new(dec!(4.5)).unwrap();
        assert_eq!(a.checked_add(b), Some(Money::new(dec!(14.5)).unwrap()));
        assert_eq!(a.checked_sub(b), Some(Money::new(dec!(5.5)).unwrap()));
        assert_eq!(b.checked_sub(a), None);
    }

    #[test]
    fn test_money_checked_add_overflow() {
        let max = Money::new(Decimal::MAX).unwrap();
        assert_eq!(max.checked_add(Money::new(dec!(1)).unwrap()), None);
    }

    #[test]
    fn test_money_rounded_matches_display() {
        let money = Money::new(dec!(120.5)).unwrap();
        assert_eq!(money.rounded().to_string(), "120.50");
        assert_eq!(money.to_string(), format!("${}", money.rounded()));
        assert_eq!(Money::new(dec!(250)).unwrap().rounded().to_string(), "250.00");
    }

    #[test]
    fn test_money_display_two_decimals() {
        assert_eq!(Money::new(dec!(3)).unwrap().to_string(), "$3.00");
        assert_eq!(Money::new(dec!(12.5)).unwrap().to_string(), "$12.50");
    }

    #[test]
    fn test_money_rejects_negative_on_deserialize() {
        assert!(serde_json::from_str::<Money>("\"1.25\"").is_ok());
        assert!(serde_json::from_str::<Money>("\"-1.25\"").is_err());
    }
}
