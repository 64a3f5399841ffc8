//! Product data types.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product as returned by `products/{id}`.
///
/// Fields the cart does not interpret are kept in `extra` and written back
/// unchanged, so a snapshot carries everything the catalog sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Unit price as a decimal number.
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Any other fields from the catalog.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with no image and no extra fields.
    pub fn new(id: i64, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: ProductId::new(id),
            title: title.into(),
            price,
            image: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Unit price converted to integer minor units.
    pub fn unit_price(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price, currency)
    }
}
