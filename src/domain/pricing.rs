//! Derived cart totals.
//!
//! Nothing here is stored: [`compute_totals`] is re-run after every change to
//! the cart or the active coupon.

use super::cart::LineItem;
use super::coupon::Coupon;
use super::money::Money;
use rust_decimal_macros::dec;
use serde::Serialize;

pub const FREE_SHIPPING_FROM: Money = Money(dec!(200));
pub const REDUCED_TIER_FROM: Money = Money(dec!(52));
pub const REDUCED_TIER_UP_TO: Money = Money(dec!(166.59));
pub const REDUCED_SHIPPING: Money = Money(dec!(15));
pub const DEFAULT_SHIPPING: Money = Money(dec!(20));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub shipping: Money,
    pub discount: Money,
    pub total: Money,
}

/// Shipping fee by subtotal tier.
///
/// Subtotals strictly between 166.59 and 200 fall through to the default fee.
pub fn shipping_fee(subtotal: Money) -> Money {
    if subtotal >= FREE_SHIPPING_FROM {
        Money::ZERO
    } else if subtotal >= REDUCED_TIER_FROM && subtotal <= REDUCED_TIER_UP_TO {
        REDUCED_SHIPPING
    } else {
        DEFAULT_SHIPPING
    }
}

pub fn compute_totals(lines: &[LineItem], coupon: Option<&Coupon>) -> CartTotals {
    let subtotal: Money = lines.iter().map(LineItem::line_total).sum();
    let shipping = shipping_fee(subtotal);
    // Rounded here so the total matches the discount that is shown and sent.
    let discount = coupon.map_or(Money::ZERO, |c| c.discount_for(subtotal).rounded());
    CartTotals {
        subtotal,
        shipping,
        discount,
        total: subtotal + shipping - discount,
    }
}
