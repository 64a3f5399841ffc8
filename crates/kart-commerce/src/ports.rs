//! Port traits the cart store depends on.
//!
//! Implementations live in the adapter crates (`kart-data` for HTTP,
//! `kart-cache` for persistence) and in [`crate::memory`] for tests.

use crate::catalog::{Product, StockLevel};
use crate::error::CartError;
use crate::ids::ProductId;
use async_trait::async_trait;

/// Source of truth for how many units of a product are purchasable.
#[async_trait]
pub trait StockOracle: Send + Sync {
    /// Fetch the current stock level. Called fresh on every mutation.
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, CartError>;
}

/// Source of canonical product data.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch product data. Called only when a product first enters the cart.
    async fn product(&self, product_id: ProductId) -> Result<Product, CartError>;
}

/// Durable storage for the serialized cart.
#[async_trait]
pub trait PersistenceChannel: Send + Sync {
    /// Read the last saved snapshot, if any.
    async fn load(&self) -> Result<Option<String>, CartError>;

    /// Overwrite the saved snapshot.
    async fn save(&self, snapshot: &str) -> Result<(), CartError>;
}

/// User-facing error surface (toasts, status lines).
pub trait NotificationSink: Send + Sync {
    /// Show an error message. Fire-and-forget.
    fn error(&self, message: &str);
}
