//! End-to-end behaviour of `CartStore` against in-memory ports.

use std::sync::Arc;

use kart_commerce::memory::{MemoryChannel, MemoryStock};
use kart_commerce::prelude::*;

struct Harness {
    stock: Arc<MemoryStock>,
    channel: Arc<MemoryChannel>,
    sink: Arc<RecordingSink>,
    store: CartStore,
}

impl Harness {
    async fn new() -> Self {
        Self::with_channel(MemoryChannel::new()).await
    }

    async fn with_channel(channel: MemoryChannel) -> Self {
        let stock = Arc::new(MemoryStock::new());
        let channel = Arc::new(channel);
        let sink = Arc::new(RecordingSink::new());
        let store = CartStore::builder(stock.clone(), stock.clone(), channel.clone())
            .with_notifier(sink.clone())
            .initialize()
            .await
            .unwrap();
        Self {
            stock,
            channel,
            sink,
            store,
        }
    }

    /// Start from a saved cart, as if restored from a previous session.
    async fn with_cart(lines: &[(i64, i64)]) -> Self {
        let lines = lines
            .iter()
            .map(|&(id, amount)| CartLine::new(product(id), amount))
            .collect();
        let snapshot = Cart::from_lines(lines).unwrap().to_snapshot().unwrap();
        Self::with_channel(MemoryChannel::with_snapshot(snapshot)).await
    }

    fn stock(&self, id: i64, available: i64) {
        self.stock.insert(product(id), available);
    }

    fn amounts(&self) -> Vec<(i64, i64)> {
        self.store
            .cart()
            .iter()
            .map(|l| (l.product_id().get(), l.amount))
            .collect()
    }

    fn persisted(&self) -> Option<Cart> {
        self.channel
            .snapshot()
            .map(|s| Cart::from_snapshot(&s).unwrap())
    }
}

fn product(id: i64) -> Product {
    Product::new(id, format!("Tênis {}", id), 100.0 + id as f64)
        .with_image(format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/{}.jpg", id))
}

fn id(value: i64) -> ProductId {
    ProductId::new(value)
}

// Scenario 1
#[tokio::test]
async fn test_add_to_empty_cart() {
    let h = Harness::new().await;
    h.stock(7, 5);

    h.store.add_product(id(7)).await.unwrap();

    assert_eq!(h.amounts(), vec![(7, 1)]);
    assert_eq!(h.persisted(), Some(h.store.cart()));
    assert_eq!(h.channel.save_count(), 1);
    assert_eq!(h.sink.count(), 0);

    let line = h.store.cart().get(id(7)).cloned().unwrap();
    assert_eq!(line.product.title, "Tênis 7");
}

// Scenario 2
#[tokio::test]
async fn test_add_beyond_stock_aborts() {
    let h = Harness::with_cart(&[(7, 1)]).await;
    h.stock(7, 1);

    let err = h.store.add_product(id(7)).await.unwrap_err();

    assert_eq!(
        err,
        CartError::StockUnavailable {
            product_id: id(7),
            requested: 2,
            available: 1
        }
    );
    assert_eq!(h.amounts(), vec![(7, 1)]);
    assert_eq!(h.channel.save_count(), 0);
    assert_eq!(h.sink.messages(), vec![Messages::english().stock_unavailable]);
}

// Scenario 3
#[tokio::test]
async fn test_update_to_zero_is_ignored() {
    let h = Harness::with_cart(&[(3, 2)]).await;
    h.stock(3, 10);

    h.store
        .update_product_amount(UpdateProductAmount::new(id(3), 0))
        .await
        .unwrap();
    h.store
        .update_product_amount(UpdateProductAmount::new(id(3), -1))
        .await
        .unwrap();

    assert_eq!(h.amounts(), vec![(3, 2)]);
    assert_eq!(h.channel.save_count(), 0);
    assert_eq!(h.stock.stock_calls(), 0);
    assert_eq!(h.sink.count(), 0);
}

// Scenario 4
#[tokio::test]
async fn test_update_within_stock() {
    let h = Harness::with_cart(&[(3, 2)]).await;
    h.stock(3, 10);

    h.store
        .update_product_amount(UpdateProductAmount::new(id(3), 5))
        .await
        .unwrap();

    assert_eq!(h.amounts(), vec![(3, 5)]);
    assert_eq!(h.persisted(), Some(h.store.cart()));
    assert_eq!(h.channel.save_count(), 1);
}

// Scenario 5
#[tokio::test]
async fn test_remove_missing_product() {
    let h = Harness::new().await;

    let err = h.store.remove_product(id(9)).await.unwrap_err();

    assert_eq!(err, CartError::NotFound(id(9)));
    assert!(h.store.cart().is_empty());
    assert_eq!(h.channel.save_count(), 0);
    assert_eq!(h.sink.messages(), vec![Messages::english().remove_failed]);
}

// Scenario 6
#[tokio::test]
async fn test_remove_existing_product() {
    let h = Harness::with_cart(&[(1, 1), (2, 1)]).await;

    h.store.remove_product(id(1)).await.unwrap();

    assert_eq!(h.amounts(), vec![(2, 1)]);
    assert_eq!(h.persisted(), Some(h.store.cart()));
    assert_eq!(h.channel.save_count(), 1);
}

#[tokio::test]
async fn test_update_beyond_stock_aborts() {
    let h = Harness::with_cart(&[(3, 2)]).await;
    h.stock(3, 4);

    let err = h
        .store
        .update_product_amount(UpdateProductAmount::new(id(3), 5))
        .await
        .unwrap_err();

    assert!(err.is_stock_unavailable());
    assert_eq!(h.amounts(), vec![(3, 2)]);
    assert_eq!(h.channel.save_count(), 0);
    assert_eq!(h.sink.messages(), vec![Messages::english().stock_unavailable]);
}

#[tokio::test]
async fn test_update_missing_product_reports_update_failed() {
    let h = Harness::with_cart(&[(1, 1)]).await;
    h.stock(2, 10);

    let err = h
        .store
        .update_product_amount(UpdateProductAmount::new(id(2), 3))
        .await
        .unwrap_err();

    assert_eq!(err, CartError::NotFound(id(2)));
    assert_eq!(h.amounts(), vec![(1, 1)]);
    assert_eq!(h.channel.save_count(), 0);
    assert_eq!(h.sink.messages(), vec![Messages::english().update_failed]);
}

#[tokio::test]
async fn test_stock_outage_reports_add_failed() {
    let h = Harness::with_cart(&[(1, 1)]).await;
    h.stock(1, 10);
    h.stock.set_offline(true);

    let err = h.store.add_product(id(1)).await.unwrap_err();

    assert!(matches!(err, CartError::Transport(_)));
    assert_eq!(h.amounts(), vec![(1, 1)]);
    assert_eq!(h.channel.save_count(), 0);
    assert_eq!(h.sink.messages(), vec![Messages::english().add_failed]);
}

#[tokio::test]
async fn test_unknown_product_reports_add_failed() {
    let h = Harness::new().await;

    let err = h.store.add_product(id(404)).await.unwrap_err();

    assert!(matches!(err, CartError::Transport(_)));
    assert!(h.store.cart().is_empty());
    assert_eq!(h.sink.count(), 1);
}

#[tokio::test]
async fn test_catalog_failure_after_stock_check_reports_add_failed() {
    let h = Harness::with_cart(&[(1, 1)]).await;
    h.stock(1, 10);
    h.stock.set_stock(id(9), 3);

    let err = h.store.add_product(id(9)).await.unwrap_err();

    assert!(matches!(err, CartError::Transport(_)));
    assert_eq!(h.stock.stock_calls(), 1);
    assert_eq!(h.stock.catalog_calls(), 1);
    assert_eq!(h.amounts(), vec![(1, 1)]);
    assert_eq!(h.channel.save_count(), 0);
    assert_eq!(h.sink.messages(), vec![Messages::english().add_failed]);
}

#[tokio::test]
async fn test_catalog_amount_field_survives_restart() {
    let h = Harness::new().await;
    let payload: Product = serde_json::from_value(serde_json::json!({
        "id": 7,
        "title": "Tênis",
        "price": 10.0,
        "image": "",
        "amount": 5
    }))
    .unwrap();
    h.stock.insert(payload, 4);

    h.store.add_product(id(7)).await.unwrap();
    assert_eq!(h.amounts(), vec![(7, 1)]);

    let restored = CartStore::builder(h.stock.clone(), h.stock.clone(), h.channel.clone())
        .initialize()
        .await
        .unwrap();
    assert_eq!(restored.cart().amount_of(id(7)), Some(1));
    assert_eq!(restored.cart(), h.store.cart());
}

#[tokio::test]
async fn test_add_at_amount_ceiling_reports_stock_unavailable() {
    let h = Harness::with_cart(&[(1, i64::MAX)]).await;
    h.stock(1, i64::MAX);

    let err = h.store.add_product(id(1)).await.unwrap_err();

    assert!(err.is_stock_unavailable());
    assert_eq!(h.amounts(), vec![(1, i64::MAX)]);
    assert_eq!(h.channel.save_count(), 0);
    assert_eq!(h.sink.messages(), vec![Messages::english().stock_unavailable]);
}

#[tokio::test]
async fn test_failed_save_keeps_last_committed_cart() {
    let h = Harness::new().await;
    h.stock(1, 10);
    h.store.add_product(id(1)).await.unwrap();

    h.channel.set_offline(true);
    let err = h.store.add_product(id(1)).await.unwrap_err();

    assert!(matches!(err, CartError::Transport(_)));
    assert_eq!(h.amounts(), vec![(1, 1)]);
    assert_eq!(h.persisted(), Some(h.store.cart()));
    assert_eq!(h.channel.save_count(), 1);
    assert_eq!(h.sink.messages(), vec![Messages::english().add_failed]);
}

#[tokio::test]
async fn test_persisted_snapshot_tracks_every_mutation() {
    let h = Harness::new().await;
    h.stock(1, 10);
    h.stock(2, 10);

    h.store.add_product(id(1)).await.unwrap();
    assert_eq!(h.persisted(), Some(h.store.cart()));
    h.store.add_product(id(2)).await.unwrap();
    assert_eq!(h.persisted(), Some(h.store.cart()));
    h.store
        .update_product_amount(UpdateProductAmount::new(id(2), 4))
        .await
        .unwrap();
    assert_eq!(h.persisted(), Some(h.store.cart()));
    h.store.remove_product(id(1)).await.unwrap();
    assert_eq!(h.persisted(), Some(h.store.cart()));

    assert_eq!(h.amounts(), vec![(2, 4)]);
    assert_eq!(h.channel.save_count(), 4);
}

#[tokio::test]
async fn test_never_exceeds_stock_or_duplicates() {
    let h = Harness::new().await;
    h.stock(1, 3);
    h.stock(2, 1);

    for _ in 0..5 {
        let _ = h.store.add_product(id(1)).await;
        let _ = h.store.add_product(id(2)).await;
    }

    assert_eq!(h.amounts(), vec![(1, 3), (2, 1)]);
    // 3 + 1 successful adds, the other 6 aborted on stock.
    assert_eq!(h.channel.save_count(), 4);
    assert_eq!(h.sink.count(), 6);
}

#[tokio::test]
async fn test_lower_stock_still_allows_decrease() {
    let h = Harness::with_cart(&[(5, 4)]).await;
    h.stock(5, 2);

    h.store
        .update_product_amount(UpdateProductAmount::new(id(5), 2))
        .await
        .unwrap();

    assert_eq!(h.amounts(), vec![(5, 2)]);
}

#[tokio::test]
async fn test_restores_cart_from_snapshot() {
    let h = Harness::with_cart(&[(1, 2), (4, 1)]).await;

    assert_eq!(h.amounts(), vec![(1, 2), (4, 1)]);
    assert_eq!(h.store.cart().size(), 2);
    assert_eq!(h.store.cart().item_count(), 3);
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let h = Harness::with_channel(MemoryChannel::with_snapshot("{not json")).await;
    assert!(h.store.cart().is_empty());

    h.stock(1, 1);
    h.store.add_product(id(1)).await.unwrap();
    assert_eq!(h.persisted(), Some(h.store.cart()));
}

#[tokio::test]
async fn test_duplicate_lines_in_snapshot_start_empty() {
    let snapshot = r#"[{"id":1,"title":"a","price":1.0,"image":"","amount":1},
                       {"id":1,"title":"a","price":1.0,"image":"","amount":2}]"#;
    let h = Harness::with_channel(MemoryChannel::with_snapshot(snapshot)).await;
    assert!(h.store.cart().is_empty());
}

#[tokio::test]
async fn test_overlapping_adds_are_serialized() {
    let h = Harness::new().await;
    h.stock(1, 3);

    let results = futures::future::join_all((0..5).map(|_| h.store.add_product(id(1)))).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 3);
    assert_eq!(h.amounts(), vec![(1, 3)]);
    assert_eq!(h.channel.save_count(), 3);
    assert_eq!(h.stock.catalog_calls(), 1);
    assert_eq!(h.sink.count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_store_across_tasks() {
    let h = Harness::new().await;
    h.stock(1, 100);
    h.stock(2, 100);
    let store = Arc::new(h.store);

    let mut handles = Vec::new();
    for n in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let product = if n % 2 == 0 { 1 } else { 2 };
            store.add_product(ProductId::new(product)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let cart = store.cart();
    assert_eq!(cart.amount_of(id(1)), Some(10));
    assert_eq!(cart.amount_of(id(2)), Some(10));
    assert_eq!(h.channel.save_count(), 20);
    assert_eq!(h.sink.count(), 0);
}

#[tokio::test]
async fn test_cart_total_after_mutations() {
    let h = Harness::new().await;
    h.stock(1, 5);
    h.stock(2, 5);

    h.store.add_product(id(1)).await.unwrap();
    h.store.add_product(id(2)).await.unwrap();
    h.store
        .update_product_amount(UpdateProductAmount::new(id(2), 3))
        .await
        .unwrap();

    // 101.00 + 3 * 102.00
    let total = h.store.cart().total(Currency::BRL).unwrap();
    assert_eq!(total.amount_cents, 40_700);
    assert_eq!(total.display(), "R$ 407,00");
}
