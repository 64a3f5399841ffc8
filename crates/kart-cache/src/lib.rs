//! Key-Value storage and cart persistence for Kart.
//!
//! Provides in-memory and file-backed Key-Value stores, and the
//! `PersistenceChannel` the cart store saves its snapshots through.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kart_cache::{CartSnapshotStore, FileStore};
//!
//! // Snapshots land in `.kart/%40RocketShoes%3Acart.kv`
//! let persistence = Arc::new(CartSnapshotStore::new(FileStore::open(".kart")?));
//!
//! let store = CartStore::builder(stock.clone(), stock, persistence)
//!     .initialize()
//!     .await?;
//! ```

mod error;
mod kv;
mod snapshot;

pub use error::CacheError;
pub use kv::{FileStore, KvStore, MemoryStore};
pub use snapshot::{CartSnapshotStore, DEFAULT_CART_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, CartSnapshotStore, FileStore, KvStore, MemoryStore};
}
