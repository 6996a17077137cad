//! Application layer: the user actions of a storefront session.
//!
//! `Storefront` is the entry point. It owns the cart, coupon and address
//! state, talks to the backend through the domain ports and reports every
//! outcome through a self-dismissing `Notifier`.

pub mod catalog;
pub mod notifier;
pub mod storefront;
