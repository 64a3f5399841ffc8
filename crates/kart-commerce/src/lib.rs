//! Shopping cart domain types and the cart store for Kart.
//!
//! This crate provides:
//!
//! - **Catalog**: Product data and stock levels as served by the store API
//! - **Cart**: The cart sequence, its lines, and derived totals
//! - **CartStore**: The single owner of the cart, validating every change
//!   against live stock and persisting each committed cart
//! - **Ports**: The traits the store talks to (`StockOracle`, `Catalog`,
//!   `PersistenceChannel`, `NotificationSink`)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kart_commerce::prelude::*;
//! use kart_commerce::memory::{MemoryChannel, MemoryStock};
//!
//! let stock = Arc::new(MemoryStock::new());
//! stock.insert(Product::new(7, "Tênis de Caminhada", 179.9), 5);
//!
//! let store = CartStore::builder(stock.clone(), stock, Arc::new(MemoryChannel::new()))
//!     .initialize()
//!     .await?;
//!
//! store.add_product(ProductId::new(7)).await?;
//! println!("Total: {}", store.cart().total(Currency::BRL)?);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod ports;

pub mod cart;
pub mod catalog;
pub mod memory;

pub use error::CartError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};
    pub use crate::ports::{Catalog, NotificationSink, PersistenceChannel, StockOracle};

    // Catalog
    pub use crate::catalog::{Product, StockLevel};

    // Cart
    pub use crate::cart::{
        Cart, CartLine, CartStore, CartStoreBuilder, Messages, RecordingSink, TracingSink,
        UpdateProductAmount,
    };
}
