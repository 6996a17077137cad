use super::money::Price;
use crate::error::StoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Below this many units a variation is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A catalog product as the backend knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// On-hand quantity for products sold without variations.
    pub stock_quantity: u32,
    pub color: Option<String>,
    pub size: Option<String>,
    pub active: bool,
}

/// Product fields without an identifier, ready to be created or updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock_quantity: u32,
    pub color: Option<String>,
    pub size: Option<String>,
    pub active: bool,
}

impl ProductDraft {
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
            color: self.color,
            size: self.size,
            active: self.active,
        }
    }
}

/// A stock-tracked attribute combination of a product, e.g. `Tamanho - M`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub id: u64,
    pub product_id: u64,
    pub name: String,
    pub value: String,
    pub stock_quantity: u32,
}

impl Variation {
    /// Label copied onto cart lines.
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.value)
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_quantity(self.stock_quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    InStock,
}

impl StockLevel {
    pub fn from_quantity(quantity: u32) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity < LOW_STOCK_THRESHOLD {
            Self::Low
        } else {
            Self::InStock
        }
    }
}

/// Raw product form input, as typed by an admin.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: String,
    pub color: String,
    pub size: String,
    pub active: bool,
}

impl ProductForm {
    /// Validates the form. Name and price are required; a blank or
    /// unparseable stock quantity counts as zero.
    pub fn validate(&self) -> Result<ProductDraft, StoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        let price = self.price.trim();
        if price.is_empty() {
            return Err(StoreError::MissingField("price"));
        }
        let price = Price::new(parse_decimal(price)?)?;

        Ok(ProductDraft {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price,
            stock_quantity: self.stock_quantity.trim().parse().unwrap_or(0),
            color: non_blank(&self.color),
            size: non_blank(&self.size),
            active: self.active,
        })
    }
}

/// Raw variation form input.
#[derive(Debug, Clone, Default)]
pub struct VariationForm {
    pub name: String,
    pub value: String,
    pub stock_quantity: String,
}

impl VariationForm {
    /// Returns `(name, value, stock)`; every field is required.
    pub fn validate(&self) -> Result<(String, String, u32), StoreError> {
        let name = self.name.trim();
        let value = self.value.trim();
        let stock = self.stock_quantity.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("variation name"));
        }
        if value.is_empty() {
            return Err(StoreError::MissingField("variation value"));
        }
        if stock.is_empty() {
            return Err(StoreError::MissingField("variation stock"));
        }
        Ok((name.to_string(), value.to_string(), parse_stock(stock)?))
    }
}

/// Parses a non-negative stock count.
pub fn parse_stock(input: &str) -> Result<u32, StoreError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| StoreError::ValidationError(format!("Invalid stock quantity: {input}")))
}

/// Accepts both `49.90` and `49,90`.
fn parse_decimal(input: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(&input.replace(',', "."))
        .map_err(|_| StoreError::ValidationError(format!("Invalid price: {input}")))
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
