use crate::error::StoreError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A monetary value in the store currency (BRL).
///
/// Arithmetic is exact; rounding to two places only happens for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

/// A strictly positive unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, StoreError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(StoreError::ValidationError(
                "Price must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = StoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl From<Price> for Money {
    fn from(price: Price) -> Self {
        Self(price.0)
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds half away from zero to cents.
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Formats as Brazilian real, e.g. `R$ 1.234,50`.
    pub fn to_brl(&self) -> String {
        let rounded = self.rounded().0;
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        let text = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let len = int_part.len();
        let mut grouped = String::with_capacity(len + len / 3);
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        format!("{sign}R$ {grouped},{frac_part}")
    }

    /// Like [`Money::to_brl`] but renders zero as `Grátis`, the way shipping is shown.
    pub fn to_shipping_label(&self) -> String {
        if self.rounded() == Self::ZERO {
            "Grátis".to_string()
        } else {
            self.to_brl()
        }
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Self;
    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(10.50));
        let b = Money::new(dec!(4.25));
        assert_eq!(a + b, Money::new(dec!(14.75)));
        assert_eq!(a - b, Money::new(dec!(6.25)));
        assert_eq!(b * 4, Money::new(dec!(17.00)));
    }

    #[test]
    fn test_price_validation() {
        assert!(Price::new(dec!(0.01)).is_ok());
        assert!(matches!(
            Price::new(dec!(0)),
            Err(StoreError::ValidationError(_))
        ));
        assert!(matches!(
            Price::new(dec!(-5)),
            Err(StoreError::ValidationError(_))
        ));
    }

    #[test]
    fn test_brl_formatting() {
        assert_eq!(Money::new(dec!(49.9)).to_brl(), "R$ 49,90");
        assert_eq!(Money::new(dec!(0)).to_brl(), "R$ 0,00");
        assert_eq!(Money::new(dec!(1234.5)).to_brl(), "R$ 1.234,50");
        assert_eq!(Money::new(dec!(1234567.891)).to_brl(), "R$ 1.234.567,89");
        assert_eq!(Money::new(dec!(-20)).to_brl(), "-R$ 20,00");
        assert_eq!(Money::new(dec!(0.005)).to_brl(), "R$ 0,01");
    }

    #[test]
    fn test_shipping_label() {
        assert_eq!(Money::ZERO.to_shipping_label(), "Grátis");
        assert_eq!(Money::new(dec!(15)).to_shipping_label(), "R$ 15,00");
    }

    #[test]
    fn test_price_deserialization_rejects_zero() {
        let ok: Price = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(ok.value(), dec!(12.5));
        assert!(serde_json::from_str::<Price>("\"0\"").is_err());
    }
}
