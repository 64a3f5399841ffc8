//! The cart store.
//!
//! `CartStore` is the only writer of the cart. Every mutation runs the same
//! cycle: check stock, build the next cart, persist it, then commit it in
//! memory. A failure anywhere in the cycle leaves both the in-memory cart
//! and the persisted snapshot untouched, and is reported once through the
//! notification sink.
//!
//! Mutations are serialized per store, so two overlapping calls (a double
//! click on "add") observe each other's result instead of racing on the
//! same starting amount. Reads never wait on a mutation in flight; they
//! see the last committed cart.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cart::{Cart, CartLine, Messages, TracingSink};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::ports::{Catalog, NotificationSink, PersistenceChannel, StockOracle};

/// Arguments of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    /// Product whose line changes.
    pub product_id: ProductId,
    /// New amount. Values of zero or below are ignored.
    pub amount: i64,
}

impl UpdateProductAmount {
    /// Create a new update request.
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder {
    stock: Arc<dyn StockOracle>,
    catalog: Arc<dyn Catalog>,
    persistence: Arc<dyn PersistenceChannel>,
    notifier: Arc<dyn NotificationSink>,
    messages: Messages,
}

impl CartStoreBuilder {
    /// Set the sink failures are reported to. Defaults to [`TracingSink`].
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Set the notification messages. Defaults to [`Messages::english`].
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Load the persisted cart and build the store.
    ///
    /// A missing snapshot starts an empty cart. An unreadable snapshot is
    /// logged and also starts an empty cart; it is overwritten by the next
    /// successful mutation. Only a failure to reach the persistence channel
    /// is returned as an error.
    pub async fn initialize(self) -> Result<CartStore, CartError> {
        let cart = match self.persistence.load().await? {
            Some(snapshot) => match Cart::from_snapshot(&snapshot) {
                Ok(cart) => {
                    info!(lines = cart.size(), "restored cart snapshot");
                    cart
                }
                Err(err) => {
                    warn!(error = %err, "discarding unreadable cart snapshot");
                    Cart::new()
                }
            },
            None => {
                debug!("no cart snapshot, starting empty");
                Cart::new()
            }
        };

        Ok(CartStore {
            cart: RwLock::new(cart),
            ops: Mutex::new(()),
            stock: self.stock,
            catalog: self.catalog,
            persistence: self.persistence,
            notifier: self.notifier,
            messages: self.messages,
        })
    }
}

/// Owner of the shopping cart.
///
/// Share it as `Arc<CartStore>`; all operations take `&self`.
pub struct CartStore {
    cart: RwLock<Cart>,
    ops: Mutex<()>,
    stock: Arc<dyn StockOracle>,
    catalog: Arc<dyn Catalog>,
    persistence: Arc<dyn PersistenceChannel>,
    notifier: Arc<dyn NotificationSink>,
    messages: Messages,
}

impl CartStore {
    /// Start building a store from its collaborators.
    pub fn builder(
        stock: Arc<dyn StockOracle>,
        catalog: Arc<dyn Catalog>,
        persistence: Arc<dyn PersistenceChannel>,
    ) -> CartStoreBuilder {
        CartStoreBuilder {
            stock,
            catalog,
            persistence,
            notifier: Arc::new(TracingSink),
            messages: Messages::default(),
        }
    }

    /// Snapshot of the last committed cart.
    pub fn cart(&self) -> Cart {
        self.cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages this store reports failures with.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its amount raised by one; a new
    /// product is fetched from the catalog and added with amount 1. Fails
    /// with `StockUnavailable` when the stock cannot cover the new amount.
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add_product(product_id).await;
        self.report(result, &self.messages.add_failed)
    }

    /// Remove a product's line.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_remove_product(product_id).await;
        self.report(result, &self.messages.remove_failed)
    }

    /// Set a product's amount.
    ///
    /// Amounts of zero or below are ignored without notification, so a
    /// decrement button pressed at 1 does nothing.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        if update.amount <= 0 {
            debug!(
                product_id = %update.product_id,
                amount = update.amount,
                "ignoring non-positive amount"
            );
            return Ok(());
        }
        let result = self.try_update_product_amount(update).await;
        self.report(result, &self.messages.update_failed)
    }

    /// Remove every line.
    pub async fn clear(&self) -> Result<(), CartError> {
        let result = self.try_clear().await;
        self.report(result, &self.messages.clear_failed)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _guard = self.ops.lock().await;
        let mut next = self.cart();

        let current = next.amount_of(product_id).unwrap_or(0);
        let requested = current
            .checked_add(1)
            .ok_or(CartError::StockUnavailable {
                product_id,
                requested: i64::MAX,
                available: current,
            })?;
        self.check_stock(product_id, requested).await?;

        if current > 0 {
            next.set_amount(product_id, requested)?;
        } else {
            let mut product = self.catalog.product(product_id).await?;
            product.id = product_id;
            next.push(CartLine::new(product, 1));
        }

        self.commit(next).await?;
        info!(product_id = %product_id, amount = requested, "added product to cart");
        Ok(())
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _guard = self.ops.lock().await;
        let mut next = self.cart();
        next.remove(product_id)?;

        self.commit(next).await?;
        info!(product_id = %product_id, "removed product from cart");
        Ok(())
    }

    async fn try_update_product_amount(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        let _guard = self.ops.lock().await;
        let mut next = self.cart();

        self.check_stock(product_id, amount).await?;
        next.set_amount(product_id, amount)?;

        self.commit(next).await?;
        info!(product_id = %product_id, amount, "updated product amount");
        Ok(())
    }

    async fn try_clear(&self) -> Result<(), CartError> {
        let _guard = self.ops.lock().await;
        self.commit(Cart::new()).await?;
        info!("cleared cart");
        Ok(())
    }

    async fn check_stock(&self, product_id: ProductId, requested: i64) -> Result<(), CartError> {
        let stock = self.stock.stock(product_id).await?;
        debug!(
            product_id = %product_id,
            requested,
            available = stock.available,
            "checked stock"
        );
        if !stock.can_fulfill(requested) {
            return Err(CartError::StockUnavailable {
                product_id,
                requested,
                available: stock.available,
            });
        }
        Ok(())
    }

    /// Persist `next`, then make it the current cart.
    async fn commit(&self, next: Cart) -> Result<(), CartError> {
        let snapshot = next.to_snapshot()?;
        self.persistence.save(&snapshot).await?;
        *self.cart.write().unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }

    fn report(&self, result: Result<(), CartError>, failure_message: &str) -> Result<(), CartError> {
        if let Err(err) = &result {
            let message = if err.is_stock_unavailable() {
                self.messages.stock_unavailable.as_str()
            } else {
                failure_message
            };
            warn!(error = %err, "cart operation failed");
            self.notifier.error(message);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::cart::RecordingSink;
    use crate::memory::{MemoryChannel, MemoryStock};

    async fn store_with(
        stock: Arc<MemoryStock>,
        channel: Arc<MemoryChannel>,
        sink: Arc<RecordingSink>,
    ) -> CartStore {
        CartStore::builder(stock.clone(), stock, channel)
            .with_notifier(sink)
            .initialize()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_new_product_fetches_catalog() {
        let stock = Arc::new(MemoryStock::new());
        stock.insert(Product::new(7, "Tênis", 179.9), 5);
        let channel = Arc::new(MemoryChannel::new());
        let sink = Arc::new(RecordingSink::new());
        let store = store_with(stock.clone(), channel.clone(), sink.clone()).await;

        store.add_product(ProductId::new(7)).await.unwrap();

        assert_eq!(store.cart().amount_of(ProductId::new(7)), Some(1));
        assert_eq!(stock.catalog_calls(), 1);
        assert_eq!(channel.save_count(), 1);
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn test_second_add_skips_catalog() {
        let stock = Arc::new(MemoryStock::new());
        stock.insert(Product::new(7, "Tênis", 179.9), 5);
        let channel = Arc::new(MemoryChannel::new());
        let sink = Arc::new(RecordingSink::new());
        let store = store_with(stock.clone(), channel.clone(), sink).await;

        store.add_product(ProductId::new(7)).await.unwrap();
        store.add_product(ProductId::new(7)).await.unwrap();

        assert_eq!(store.cart().amount_of(ProductId::new(7)), Some(2));
        assert_eq!(stock.catalog_calls(), 1);
        assert_eq!(stock.stock_calls(), 2);
    }

    #[tokio::test]
    async fn test_catalog_id_is_forced_to_requested_id() {
        let stock = Arc::new(MemoryStock::new());
        // Catalog entry registered under 4 but claiming id 99.
        stock.insert_as(ProductId::new(4), Product::new(99, "Mislabelled", 10.0), 3);
        let store = store_with(
            stock,
            Arc::new(MemoryChannel::new()),
            Arc::new(RecordingSink::new()),
        )
        .await;

        store.add_product(ProductId::new(4)).await.unwrap();
        assert!(store.cart().contains(ProductId::new(4)));
        assert!(!store.cart().contains(ProductId::new(99)));
    }

    #[tokio::test]
    async fn test_stock_unavailable_uses_stock_message() {
        let stock = Arc::new(MemoryStock::new());
        stock.insert(Product::new(1, "Tênis", 10.0), 0);
        let sink = Arc::new(RecordingSink::new());
        let store = store_with(stock, Arc::new(MemoryChannel::new()), sink.clone()).await;

        let err = store.add_product(ProductId::new(1)).await.unwrap_err();
        assert!(err.is_stock_unavailable());
        assert_eq!(sink.last(), Some(store.messages().stock_unavailable.clone()));
    }

    #[tokio::test]
    async fn test_custom_messages() {
        let sink = Arc::new(RecordingSink::new());
        let stock = Arc::new(MemoryStock::new());
        let store = CartStore::builder(stock.clone(), stock, Arc::new(MemoryChannel::new()))
            .with_notifier(sink.clone())
            .with_messages(Messages::pt_br())
            .initialize()
            .await
            .unwrap();

        let _ = store.remove_product(ProductId::new(9)).await;
        assert_eq!(sink.messages(), vec!["Erro na remoção do produto"]);
    }

    #[tokio::test]
    async fn test_clear_persists_empty_cart() {
        let stock = Arc::new(MemoryStock::new());
        stock.insert(Product::new(1, "Tênis", 10.0), 2);
        let channel = Arc::new(MemoryChannel::new());
        let store = store_with(stock, channel.clone(), Arc::new(RecordingSink::new())).await;

        store.add_product(ProductId::new(1)).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.cart().is_empty());
        assert_eq!(channel.snapshot().as_deref(), Some("[]"));
        assert_eq!(channel.save_count(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_is_returned() {
        let channel = Arc::new(MemoryChannel::new());
        channel.set_offline(true);
        let stock = Arc::new(MemoryStock::new());

        let result = CartStore::builder(stock.clone(), stock, channel)
            .initialize()
            .await;
        assert!(matches!(result, Err(CartError::Transport(_))));
    }
}
