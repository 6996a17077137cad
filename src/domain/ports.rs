use super::address::{PostalAddress, PostalCode};
use super::coupon::Coupon;
use super::order::{OrderPayload, OrderReceipt};
use super::product::{Product, ProductDraft};
use crate::error::Result;
use async_trait::async_trait;

/// The store's REST backend: catalog, coupons and orders.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn create_product(&self, draft: ProductDraft) -> Result<Product>;
    async fn update_product(&self, id: u64, draft: ProductDraft) -> Result<Product>;
    /// `Ok(None)` when the backend does not know the code.
    async fn find_coupon(&self, code: &str) -> Result<Option<Coupon>>;
    async fn submit_order(&self, order: &OrderPayload) -> Result<OrderReceipt>;
}

/// Address autofill keyed by postal code.
#[async_trait]
pub trait PostalService: Send + Sync {
    /// `Ok(None)` when the code does not exist.
    async fn lookup(&self, code: &PostalCode) -> Result<Option<PostalAddress>>;
}

pub type StoreBackendBox = Box<dyn StoreBackend>;
pub type PostalServiceBox = Box<dyn PostalService>;
