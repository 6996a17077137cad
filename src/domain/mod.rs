//! Domain model: catalog entities, cart, coupon rules, derived pricing and the
//! ports through which the outside world is reached.

pub mod address;
pub mod cart;
pub mod coupon;
pub mod money;
pub mod notification;
pub mod order;
pub mod ports;
pub mod pricing;
pub mod product;
