use super::catalog::Catalog;
use super::notifier::Notifier;
use crate::domain::address::{AddressField, PostalCode, ShippingAddress};
use crate::domain::cart::Cart;
use crate::domain::coupon::Coupon;
use crate::domain::notification::{DEFAULT_TTL, Level, Notification};
use crate::domain::order::{OrderPayload, OrderReceipt};
use crate::domain::ports::{PostalServiceBox, StoreBackendBox};
use crate::domain::pricing::{CartTotals, compute_totals};
use crate::domain::product::{Product, ProductForm, Variation, VariationForm};
use crate::error::{Result, StoreError};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{info, warn};

pub type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// One shopper/admin session.
///
/// Every public method is a user action. Actions take `&mut self`, so each one
/// runs to completion before the next starts. Failures are reported through
/// the notifier and returned; state is left as it was before the action.
pub struct Storefront {
    backend: StoreBackendBox,
    postal: PostalServiceBox,
    catalog: Catalog,
    cart: Cart,
    coupon: Option<Coupon>,
    address: ShippingAddress,
    postal_code: PostalCode,
    confirmed_postal_code: Option<PostalCode>,
    notifier: Notifier,
    today: Clock,
}

impl Storefront {
    /// Creates a session with an empty catalog and cart.
    ///
    /// # Arguments
    ///
    /// * `backend` - The store REST backend.
    /// * `postal` - The postal-code lookup service.
    pub fn new(backend: StoreBackendBox, postal: PostalServiceBox) -> Self {
        Self {
            backend,
            postal,
            catalog: Catalog::new(),
            cart: Cart::new(),
            coupon: None,
            address: ShippingAddress::default(),
            postal_code: PostalCode::default(),
            confirmed_postal_code: None,
            notifier: Notifier::new(DEFAULT_TTL),
            today: Box::new(|| chrono::Local::now().date_naive()),
        }
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notifier = Notifier::new(ttl);
        self
    }

    /// Replaces the date source used for coupon expiry.
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn address(&self) -> &ShippingAddress {
        &self.address
    }

    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    pub fn dismiss_notification(&self) {
        self.notifier.dismiss();
    }

    /// Totals derived from the current lines and coupon.
    pub fn totals(&self) -> CartTotals {
        compute_totals(self.cart.lines(), self.coupon.as_ref())
    }

    /// Whether the current postal code was confirmed by a lookup.
    pub fn postal_code_confirmed(&self) -> bool {
        self.confirmed_postal_code
            .as_ref()
            .is_some_and(|confirmed| *confirmed == self.postal_code)
    }

    // Catalog administration

    pub async fn load_catalog(&mut self) -> Result<usize> {
        let result = self.catalog.refresh(self.backend.as_ref()).await;
        self.report(result, |count| format!("{count} products loaded"))
    }

    pub async fn save_product(&mut self, id: Option<u64>, form: &ProductForm) -> Result<Product> {
        let result = self
            .catalog
            .save_product(self.backend.as_ref(), id, form)
            .await;
        let verb = if id.is_some() { "updated" } else { "created" };
        self.report(result, |p| format!("Product {} {verb}", p.name))
    }

    pub fn add_variation(&mut self, product_id: u64, form: &VariationForm) -> Result<Variation> {
        let result = self.catalog.add_variation(product_id, form);
        self.report(result, |v| format!("Variation {} added", v.label()))
    }

    pub fn remove_variation(&mut self, variation_id: u64) -> Result<Variation> {
        let result = self.catalog.remove_variation(variation_id);
        self.report(result, |v| format!("Variation {} removed", v.label()))
    }

    pub fn update_inventory(&mut self, variation_id: u64, new_stock: &str) -> Result<Variation> {
        let result = self.catalog.update_inventory(variation_id, new_stock);
        self.report(result, |_| "Inventory updated".to_string())
    }

    // Cart

    pub fn add_to_cart(&mut self, product_id: u64) -> Result<u64> {
        let result = match self.catalog.product(product_id) {
            Some(product) => self.cart.add(product, self.catalog.variations()),
            None => Err(StoreError::ProductNotFound(product_id)),
        };
        self.report(result, |_| "Product added to cart".to_string())
    }

    /// Quantities below 1 are ignored silently.
    pub fn update_quantity(&mut self, line_id: u64, quantity: i64) -> bool {
        self.cart.update_quantity(line_id, quantity)
    }

    pub fn remove_line(&mut self, line_id: u64) {
        if self.cart.remove(line_id).is_some() {
            self.notifier.notify("Item removed from cart", Level::Success);
        }
    }

    // Address

    /// Stores the normalised postal code input. A different code drops any
    /// earlier confirmation.
    pub fn set_postal_code(&mut self, input: &str) {
        let code = PostalCode::normalize(input);
        if code != self.postal_code {
            self.confirmed_postal_code = None;
        }
        self.postal_code = code;
    }

    pub fn set_address_field(&mut self, field: AddressField, value: &str) {
        self.address.set(field, value);
    }

    /// Looks up the current postal code and autofills the address.
    pub async fn lookup_postal_code(&mut self) -> Result<()> {
        let result = self.try_lookup_postal_code().await;
        self.report(result, |_| "Address filled from postal code".to_string())
    }

    async fn try_lookup_postal_code(&mut self) -> Result<()> {
        self.postal_code.ensure_complete()?;
        self.notifier
            .notify("Looking up postal code...", Level::Info);

        let code = self.postal_code.clone();
        let found = self
            .postal
            .lookup(&code)
            .await?
            .ok_or_else(|| StoreError::PostalCodeNotFound(code.to_string()))?;

        self.address.fill_from(&found);
        self.confirmed_postal_code = Some(code);
        Ok(())
    }

    // Coupon

    pub async fn apply_coupon(&mut self, code: &str) -> Result<Coupon> {
        let result = self.fetch_eligible_coupon(code).await;
        if let Ok(coupon) = &result {
            self.coupon = Some(coupon.clone());
        }
        self.report(result, |c| format!("Coupon {} applied", c.code))
    }

    async fn fetch_eligible_coupon(&self, code: &str) -> Result<Coupon> {
        let code = code.trim();
        if code.is_empty() {
            return Err(StoreError::MissingField("coupon code"));
        }
        let coupon = self
            .backend
            .find_coupon(code)
            .await?
            .ok_or_else(|| StoreError::CouponNotFound(code.to_string()))?;
        coupon.check_eligibility(self.cart.subtotal(), (self.today)())?;
        Ok(coupon)
    }

    pub fn remove_coupon(&mut self) {
        if self.coupon.take().is_some() {
            self.notifier.notify("Coupon removed", Level::Success);
        }
    }

    // Checkout

    /// Submits the order. On success the cart, address and coupon are cleared;
    /// on any failure nothing changes.
    pub async fn checkout(&mut self) -> Result<OrderReceipt> {
        let result = self.submit_order().await;
        if result.is_ok() {
            self.cart.clear();
            self.coupon = None;
            self.address = ShippingAddress::default();
            self.postal_code = PostalCode::default();
            self.confirmed_postal_code = None;
        }
        self.report(result, |receipt| format!("Order {} placed", receipt.id))
    }

    async fn submit_order(&self) -> Result<OrderReceipt> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        self.address.ensure_complete()?;
        if !self.postal_code_confirmed() {
            return Err(StoreError::PostalCodeNotValidated);
        }

        let order = OrderPayload::new(
            self.cart.lines(),
            self.totals(),
            &self.postal_code,
            &self.address,
            self.coupon.as_ref(),
        );
        self.backend.submit_order(&order).await
    }

    fn report<T>(&mut self, result: Result<T>, success: impl FnOnce(&T) -> String) -> Result<T> {
        match &result {
            Ok(value) => {
                let message = success(value);
                info!("{message}");
                self.notifier.notify(message, Level::Success);
            }
            Err(e) => {
                warn!(kind = ?e.kind(), "{e}");
                self.notifier.notify(e.to_string(), Level::Danger);
            }
        }
        result
    }
}
