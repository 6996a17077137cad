use crate::domain::ports::StoreBackend;
use crate::domain::product::{Product, ProductForm, Variation, VariationForm, parse_stock};
use crate::error::{Result, StoreError};
use tracing::{debug, info};

/// Local view of the product catalog and its variations.
///
/// Products round-trip through the backend; variations are kept locally.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    variations: Vec<Variation>,
    next_variation_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from already known products and variations.
    pub fn with_items(products: Vec<Product>, variations: Vec<Variation>) -> Self {
        let next_variation_id = variations.iter().map(|v| v.id).max().unwrap_or(0);
        Self {
            products,
            variations,
            next_variation_id,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn variations_of(&self, product_id: u64) -> impl Iterator<Item = &Variation> {
        self.variations
            .iter()
            .filter(move |v| v.product_id == product_id)
    }

    /// Replaces the product list with what the backend currently has.
    pub async fn refresh(&mut self, backend: &dyn StoreBackend) -> Result<usize> {
        self.products = backend.list_products().await?;
        debug!(count = self.products.len(), "catalog refreshed");
        Ok(self.products.len())
    }

    /// Creates a product when `id` is `None`, updates it otherwise.
    pub async fn save_product(
        &mut self,
        backend: &dyn StoreBackend,
        id: Option<u64>,
        form: &ProductForm,
    ) -> Result<Product> {
        let draft = form.validate()?;
        let saved = match id {
            Some(id) => {
                if self.product(id).is_none() {
                    return Err(StoreError::ProductNotFound(id));
                }
                backend.update_product(id, draft).await?
            }
            None => backend.create_product(draft).await?,
        };

        match self.products.iter_mut().find(|p| p.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => self.products.push(saved.clone()),
        }
        info!(product_id = saved.id, "product saved");
        Ok(saved)
    }

    pub fn add_variation(&mut self, product_id: u64, form: &VariationForm) -> Result<Variation> {
        if self.product(product_id).is_none() {
            return Err(StoreError::ProductNotFound(product_id));
        }
        let (name, value, stock_quantity) = form.validate()?;

        self.next_variation_id += 1;
        let variation = Variation {
            id: self.next_variation_id,
            product_id,
            name,
            value,
            stock_quantity,
        };
        self.variations.push(variation.clone());
        Ok(variation)
    }

    pub fn remove_variation(&mut self, variation_id: u64) -> Result<Variation> {
        let index = self
            .variations
            .iter()
            .position(|v| v.id == variation_id)
            .ok_or(StoreError::VariationNotFound(variation_id))?;
        Ok(self.variations.remove(index))
    }

    /// Sets a variation's stock from raw input; it must be a non-negative integer.
    pub fn update_inventory(&mut self, variation_id: u64, new_stock: &str) -> Result<Variation> {
        let stock = parse_stock(new_stock)?;
        let variation = self
            .variations
            .iter_mut()
            .find(|v| v.id == variation_id)
            .ok_or(StoreError::VariationNotFound(variation_id))?;
        variation.stock_quantity = stock;
        Ok(variation.clone())
    }
}
