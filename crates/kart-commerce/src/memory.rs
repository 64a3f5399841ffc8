//! In-memory port implementations.
//!
//! Used for testing and development without a store API or durable storage.
//! Thread-safe using RwLock for concurrent access.

use crate::catalog::{Product, StockLevel};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::ports::{Catalog, PersistenceChannel, StockOracle};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

/// In-memory stock oracle and catalog.
///
/// Every call yields to the runtime once before answering, so overlapping
/// operations interleave the way they would against a real network.
#[derive(Default)]
pub struct MemoryStock {
    products: RwLock<HashMap<ProductId, Product>>,
    levels: RwLock<HashMap<ProductId, i64>>,
    offline: AtomicBool,
    stock_calls: AtomicUsize,
    catalog_calls: AtomicUsize,
}

impl MemoryStock {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with its available stock.
    pub fn insert(&self, product: Product, available: i64) {
        self.insert_as(product.id, product, available);
    }

    /// Register a product under an explicit id.
    pub fn insert_as(&self, product_id: ProductId, product: Product, available: i64) {
        write(&self.products).insert(product_id, product);
        write(&self.levels).insert(product_id, available);
    }

    /// Change the available stock of a product.
    ///
    /// A product registered only this way has stock but no catalog entry,
    /// so adding it fails at the catalog lookup.
    pub fn set_stock(&self, product_id: ProductId, available: i64) {
        write(&self.levels).insert(product_id, available);
    }

    /// Make every call fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stock queries answered or failed.
    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    /// Number of catalog queries answered or failed.
    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), CartError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CartError::Transport("stock service unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StockOracle for MemoryStock {
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, CartError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check_online()?;
        let available = read(&self.levels)
            .get(&product_id)
            .copied()
            .ok_or_else(|| CartError::Transport(format!("stock/{} returned 404", product_id)))?;
        Ok(StockLevel::new(product_id, available))
    }
}

#[async_trait]
impl Catalog for MemoryStock {
    async fn product(&self, product_id: ProductId) -> Result<Product, CartError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check_online()?;
        read(&self.products)
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CartError::Transport(format!("products/{} returned 404", product_id)))
    }
}

/// In-memory persistence channel that counts writes.
#[derive(Default)]
pub struct MemoryChannel {
    snapshot: RwLock<Option<String>>,
    offline: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryChannel {
    /// Create a channel with no saved snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a channel holding a snapshot.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot.into())),
            ..Self::default()
        }
    }

    /// The currently saved snapshot.
    pub fn snapshot(&self) -> Option<String> {
        read(&self.snapshot).clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make load and save fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), CartError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CartError::Transport("storage unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceChannel for MemoryChannel {
    async fn load(&self) -> Result<Option<String>, CartError> {
        self.check_online()?;
        Ok(self.snapshot())
    }

    async fn save(&self, snapshot: &str) -> Result<(), CartError> {
        self.check_online()?;
        *write(&self.snapshot) = Some(snapshot.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
