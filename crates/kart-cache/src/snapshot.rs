//! Cart persistence on top of a Key-Value store.

use crate::kv::KvStore;
use crate::CacheError;
use async_trait::async_trait;
use kart_commerce::ports::PersistenceChannel;
use kart_commerce::CartError;

/// Key the RocketShoes storefront keeps its cart under.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Persistence channel storing the serialized cart under a single key.
///
/// The snapshot is stored verbatim, so a value written by any client that
/// uses the same key and JSON shape can be restored.
pub struct CartSnapshotStore<S> {
    store: S,
    key: String,
}

impl<S: KvStore> CartSnapshotStore<S> {
    /// Create a snapshot store using [`DEFAULT_CART_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY)
    }

    /// Create a snapshot store using a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Key the snapshot is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl<S: KvStore> PersistenceChannel for CartSnapshotStore<S> {
    async fn load(&self) -> Result<Option<String>, CartError> {
        let snapshot = match self.store.get(&self.key)? {
            Some(bytes) => Some(String::from_utf8(bytes).map_err(|e| {
                CacheError::StoreError(format!("{}: not UTF-8: {}", self.key, e))
            })?),
            None => None,
        };
        tracing::debug!(key = %self.key, found = snapshot.is_some(), "loaded cart snapshot");
        Ok(snapshot)
    }

    async fn save(&self, snapshot: &str) -> Result<(), CartError> {
        self.store.set(&self.key, snapshot.as_bytes())?;
        tracing::debug!(key = %self.key, bytes = snapshot.len(), "saved cart snapshot");
        Ok(())
    }
}
