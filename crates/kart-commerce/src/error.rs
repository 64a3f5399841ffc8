//! Cart error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Every variant is an expected outcome: the store reports it through its
/// notification sink and hands it back to the caller, it never panics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartError {
    /// Requested amount is above what the stock source can supply.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    StockUnavailable {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The operation targets a product that has no line in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// A stock, catalog or persistence call failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Cart snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// A total or subtotal does not fit in minor units.
    #[error("Amount overflow: {0}")]
    Overflow(String),
}

impl CartError {
    /// Build a transport error from anything displayable.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        CartError::Transport(err.to_string())
    }

    /// Whether this is a stock shortage rather than a failure.
    pub fn is_stock_unavailable(&self) -> bool {
        matches!(self, CartError::StockUnavailable { .. })
    }
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Snapshot(e.to_string())
    }
}
