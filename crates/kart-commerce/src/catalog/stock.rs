//! Stock level as reported by the stock source.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Units of a product currently available for purchase.
///
/// Mirrors the `stock/{id}` payload: `{ "id": 1, "amount": 3 }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockLevel {
    /// Product this level belongs to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Available units.
    #[serde(rename = "amount")]
    pub available: i64,
}

impl StockLevel {
    /// Create a new stock level. Negative counts are clamped to zero.
    pub fn new(product_id: ProductId, available: i64) -> Self {
        Self {
            product_id,
            available: available.max(0),
        }
    }

    /// Check if a specific amount can be supplied.
    pub fn can_fulfill(&self, amount: i64) -> bool {
        amount <= self.available
    }
}
