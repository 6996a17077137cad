use crate::domain::address::{PostalAddress, PostalCode};
use crate::domain::coupon::Coupon;
use crate::domain::money::{Money, Price};
use crate::domain::order::{OrderPayload, OrderReceipt};
use crate::domain::ports::{PostalService, StoreBackend};
use crate::domain::product::{Product, ProductDraft, Variation};
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory stand-in for the store backend.
///
/// `Clone` shares the underlying state, so a test can keep a handle and
/// inspect submitted orders after moving a clone into a session.
#[derive(Default, Clone)]
pub struct InMemoryBackend {
    products: Arc<RwLock<BTreeMap<u64, Product>>>,
    coupons: Arc<RwLock<HashMap<String, Coupon>>>,
    orders: Arc<RwLock<Vec<OrderPayload>>>,
    order_rejection: Arc<RwLock<Option<String>>>,
}

impl InMemoryBackend {
    /// Creates a new, empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend preloaded with a small demo catalog and coupon set.
    pub fn seeded() -> Self {
        let products = seed_products()
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        let coupons = seed_coupons()
            .into_iter()
            .map(|c| (c.code.clone(), c))
            .collect();
        Self {
            products: Arc::new(RwLock::new(products)),
            coupons: Arc::new(RwLock::new(coupons)),
            ..Self::default()
        }
    }

    pub async fn insert_coupon(&self, coupon: Coupon) {
        self.coupons.write().await.insert(coupon.code.clone(), coupon);
    }

    /// Makes every following order submission fail with HTTP 422 and `message`.
    pub async fn reject_orders(&self, message: impl Into<String>) {
        *self.order_rejection.write().await = Some(message.into());
    }

    pub async fn submitted_orders(&self) -> Vec<OrderPayload> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl StoreBackend for InMemoryBackend {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<Product> {
        let mut products = self.products.write().await;
        let id = products.keys().next_back().map_or(1, |last| last + 1);
        let product = draft.into_product(id);
        products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: u64, draft: ProductDraft) -> Result<Product> {
        let mut products = self.products.write().await;
        let slot = products
            .get_mut(&id)
            .ok_or(StoreError::ProductNotFound(id))?;
        *slot = draft.into_product(id);
        Ok(slot.clone())
    }

    async fn find_coupon(&self, code: &str) -> Result<Option<Coupon>> {
        let coupons = self.coupons.read().await;
        Ok(coupons.get(code).cloned())
    }

    async fn submit_order(&self, order: &OrderPayload) -> Result<OrderReceipt> {
        if let Some(message) = self.order_rejection.read().await.clone() {
            return Err(StoreError::Backend {
                status: 422,
                message,
            });
        }
        let mut orders = self.orders.write().await;
        orders.push(order.clone());
        Ok(OrderReceipt {
            id: orders.len() as u64,
        })
    }
}

/// Postal lookup backed by a fixed table.
#[derive(Default, Clone)]
pub struct InMemoryPostalService {
    addresses: Arc<RwLock<HashMap<PostalCode, PostalAddress>>>,
}

impl InMemoryPostalService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let addresses = [
            ("01001000", "Praça da Sé", "Sé", "São Paulo", "SP"),
            ("80010000", "Rua XV de Novembro", "Centro", "Curitiba", "PR"),
            ("20040002", "Avenida Rio Branco", "Centro", "Rio de Janeiro", "RJ"),
        ]
        .into_iter()
        .map(|(code, street, neighborhood, city, state)| {
            (
                PostalCode::normalize(code),
                PostalAddress {
                    street: street.to_string(),
                    neighborhood: neighborhood.to_string(),
                    city: city.to_string(),
                    state: state.to_string(),
                },
            )
        })
        .collect();
        Self {
            addresses: Arc::new(RwLock::new(addresses)),
        }
    }

    pub async fn insert(&self, code: PostalCode, address: PostalAddress) {
        self.addresses.write().await.insert(code, address);
    }
}

#[async_trait]
impl PostalService for InMemoryPostalService {
    async fn lookup(&self, code: &PostalCode) -> Result<Option<PostalAddress>> {
        let addresses = self.addresses.read().await;
        Ok(addresses.get(code).cloned())
    }
}

fn seed_products() -> Vec<Product> {
    [
        (1, "Camiseta Básica", "Algodão, gola careca", dec!(49.90), 10),
        (2, "Calça Jeans", "Corte reto", dec!(129.90), 5),
        (3, "Tênis Esportivo", "Solado de borracha", dec!(199.90), 3),
    ]
    .into_iter()
    .filter_map(|(id, name, description, price, stock_quantity)| {
        Some(Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price: Price::new(price).ok()?,
            stock_quantity,
            color: None,
            size: None,
            active: true,
        })
    })
    .collect()
}

/// Size variations for the demo catalog.
pub fn seed_variations() -> Vec<Variation> {
    [
        (1, 1, "P", 3),
        (2, 1, "M", 4),
        (3, 1, "G", 3),
        (4, 2, "38", 2),
        (5, 2, "40", 3),
        (6, 3, "41", 1),
        (7, 3, "42", 2),
    ]
    .into_iter()
    .map(|(id, product_id, value, stock_quantity)| Variation {
        id,
        product_id,
        name: "Tamanho".to_string(),
        value: value.to_string(),
        stock_quantity,
    })
    .collect()
}

fn seed_coupons() -> Vec<Coupon> {
    let seeds: [(&str, Decimal, Decimal, (i32, u32, u32), u32, u32); 4] = [
        ("DEZ", dec!(10), dec!(50), (2030, 12, 31), 100, 0),
        ("VIP", dec!(20), dec!(500), (2030, 12, 31), 100, 0),
        ("VENCIDO", dec!(10), dec!(0), (2025, 1, 1), 100, 0),
        ("ESGOTADO", dec!(15), dec!(0), (2030, 12, 31), 10, 10),
    ];
    seeds
        .into_iter()
        .filter_map(|(code, percentage, minimum, (y, m, d), usage_limit, times_used)| {
            Some(Coupon {
                code: code.to_string(),
                percentage,
                minimum_subtotal: Money::new(minimum),
                expires_on: NaiveDate::from_ymd_opt(y, m, d)?,
                usage_limit,
                times_used,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::ShippingAddress;
    use crate::domain::pricing::compute_totals;

    #[tokio::test]
    async fn test_in_memory_product_store() {
        let backend = InMemoryBackend::new();
        let draft = ProductDraft {
            name: "Meia".to_string(),
            description: String::new(),
            price: Price::new(dec!(9.90)).unwrap(),
            stock_quantity: 30,
            color: Some("Preta".to_string()),
            size: None,
            active: true,
        };

        let created = backend.create_product(draft.clone()).await.unwrap();
        assert_eq!(created.id, 1);
        let second = backend.create_product(draft.clone()).await.unwrap();
        assert_eq!(second.id, 2);

        let updated = backend
            .update_product(1, ProductDraft {
                stock_quantity: 0,
                ..draft.clone()
            })
            .await
            .unwrap();
        assert_eq!(updated.stock_quantity, 0);
        assert!(matches!(
            backend.update_product(9, draft).await,
            Err(StoreError::ProductNotFound(9))
        ));
        assert_eq!(backend.list_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seeded_backend() {
        let backend = InMemoryBackend::seeded();
        assert_eq!(backend.list_products().await.unwrap().len(), 3);
        assert!(backend.find_coupon("DEZ").await.unwrap().is_some());
        assert!(backend.find_coupon("dez").await.unwrap().is_none());
        assert_eq!(seed_variations().len(), 7);
    }

    #[tokio::test]
    async fn test_in_memory_orders() {
        let backend = InMemoryBackend::new();
        let order = OrderPayload::new(
            &[],
            compute_totals(&[], None),
            &PostalCode::normalize("01001000"),
            &ShippingAddress::default(),
            None,
        );

        let receipt = backend.submit_order(&order).await.unwrap();
        assert_eq!(receipt.id, 1);
        assert_eq!(backend.submitted_orders().await.len(), 1);

        backend.reject_orders("fora do ar").await;
        assert!(matches!(
            backend.submit_order(&order).await,
            Err(StoreError::Backend { status: 422, .. })
        ));
        assert_eq!(backend.submitted_orders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_postal_service() {
        let service = InMemoryPostalService::seeded();
        let found = service
            .lookup(&PostalCode::normalize("01001-000"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.state, "SP");
        assert!(service
            .lookup(&PostalCode::normalize("00000000"))
            .await
            .unwrap()
            .is_none());
    }
}
