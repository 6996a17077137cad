use super::money::Money;
use crate::error::StoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A backend-issued discount code. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    /// Percentage off the subtotal, e.g. `10` for 10%.
    pub percentage: Decimal,
    pub minimum_subtotal: Money,
    pub expires_on: NaiveDate,
    pub usage_limit: u32,
    pub times_used: u32,
}

impl Coupon {
    /// Checks whether the coupon can be applied to `subtotal` on `today`.
    ///
    /// Rules are evaluated in order: minimum spend, usage cap, expiry. A coupon
    /// is still valid on its expiry date.
    pub fn check_eligibility(&self, subtotal: Money, today: NaiveDate) -> Result<(), StoreError> {
        if subtotal < self.minimum_subtotal {
            return Err(StoreError::CouponBelowMinimum(self.minimum_subtotal.value()));
        }
        if self.times_used >= self.usage_limit {
            return Err(StoreError::CouponExhausted);
        }
        if today > self.expires_on {
            return Err(StoreError::CouponExpired(self.expires_on));
        }
        Ok(())
    }

    /// Discount for `subtotal`, or zero when the subtotal no longer meets the minimum.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if subtotal < self.minimum_subtotal {
            return Money::ZERO;
        }
        Money::new(subtotal.value() * self.percentage / Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn coupon() -> Coupon {
        Coupon {
            code: "DEZ".to_string(),
            percentage: dec!(10),
            minimum_subtotal: Money::new(dec!(50)),
            expires_on: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            usage_limit: 100,
            times_used: 3,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_eligible_coupon() {
        assert!(coupon()
            .check_eligibility(Money::new(dec!(50)), day(2026, 12, 31))
            .is_ok());
    }

    #[test]
    fn test_below_minimum() {
        assert!(matches!(
            coupon().check_eligibility(Money::new(dec!(49.99)), day(2026, 1, 1)),
            Err(StoreError::CouponBelowMinimum(_))
        ));
    }

    #[test]
    fn test_usage_exhausted() {
        let mut c = coupon();
        c.times_used = 100;
        assert!(matches!(
            c.check_eligibility(Money::new(dec!(100)), day(2026, 1, 1)),
            Err(StoreError::CouponExhausted)
        ));
    }

    #[test]
    fn test_expired() {
        assert!(matches!(
            coupon().check_eligibility(Money::new(dec!(100)), day(2027, 1, 1)),
            Err(StoreError::CouponExpired(_))
        ));
    }

    #[test]
    fn test_minimum_checked_before_expiry() {
        assert!(matches!(
            coupon().check_eligibility(Money::new(dec!(10)), day(2027, 1, 1)),
            Err(StoreError::CouponBelowMinimum(_))
        ));
    }

    #[test]
    fn test_discount_for() {
        let c = coupon();
        assert_eq!(c.discount_for(Money::new(dec!(200))), Money::new(dec!(20)));
        assert_eq!(c.discount_for(Money::new(dec!(49.90))), Money::ZERO);
    }
}
