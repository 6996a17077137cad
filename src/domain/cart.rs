use super::money::Money;
use super::product::{Product, Variation};
use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// One cart entry. Price and names are snapshots taken when the line was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    pub product_id: u64,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub variation_id: Option<u64>,
    pub variation: Option<String>,
}

impl LineItem {
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// The shopping cart. Lines are never merged; every add appends a new line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<LineItem>,
    next_id: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, line_id: u64) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// Appends a line with quantity 1 and returns its id.
    ///
    /// When the product has variations, the first one with stock is used;
    /// otherwise the product's own stock must be positive.
    pub fn add(&mut self, product: &Product, variations: &[Variation]) -> Result<u64, StoreError> {
        if !product.active {
            return Err(StoreError::ValidationError(format!(
                "Product {} is inactive",
                product.id
            )));
        }

        let mut own_variations = variations
            .iter()
            .filter(|v| v.product_id == product.id)
            .peekable();

        let variation = if own_variations.peek().is_some() {
            let chosen = own_variations
                .find(|v| v.stock_quantity > 0)
                .ok_or(StoreError::OutOfStock)?;
            Some(chosen)
        } else if product.stock_quantity > 0 {
            None
        } else {
            return Err(StoreError::OutOfStock);
        };

        self.next_id += 1;
        let id = self.next_id;
        self.lines.push(LineItem {
            id,
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price.into(),
            quantity: 1,
            variation_id: variation.map(|v| v.id),
            variation: variation.map(Variation::label),
        });
        Ok(id)
    }

    /// Replaces a line's quantity. Quantities below 1 and unknown lines are
    /// ignored; returns whether anything changed.
    pub fn update_quantity(&mut self, line_id: u64, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity) else {
            return false;
        };
        if quantity < 1 {
            return false;
        }
        match self.lines.iter_mut().find(|line| line.id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, line_id: u64) -> Option<LineItem> {
        let index = self.lines.iter().position(|line| line.id == line_id)?;
        Some(self.lines.remove(index))
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Empties the cart. Line ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
