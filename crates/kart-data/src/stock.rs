//! Stock and catalog lookups over HTTP.

use crate::{FetchClient, FetchError};
use async_trait::async_trait;
use kart_commerce::catalog::{Product, StockLevel};
use kart_commerce::ports::{Catalog, StockOracle};
use kart_commerce::{CartError, ProductId};

/// Relative path of the stock endpoint for a product.
pub fn stock_path(id: ProductId) -> String {
    format!("/stock/{}", id)
}

/// Relative path of the product endpoint.
pub fn product_path(id: ProductId) -> String {
    format!("/products/{}", id)
}

/// Answers stock and catalog queries from the store API.
///
/// Every call is a single GET. Failures are not retried; the cart store
/// reports them and leaves the cart untouched.
#[derive(Clone)]
pub struct HttpStockService {
    client: FetchClient,
}

impl HttpStockService {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: String) -> Result<T, FetchError> {
        let response = self
            .client
            .get(path)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;
        response.json()
    }
}

#[async_trait]
impl StockOracle for HttpStockService {
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, CartError> {
        let level: StockLevel = self.fetch(stock_path(product_id)).await.map_err(|e| {
            tracing::warn!(product_id = %product_id, error = %e, "stock lookup failed");
            CartError::from(e)
        })?;
        Ok(StockLevel::new(product_id, level.available))
    }
}

#[async_trait]
impl Catalog for HttpStockService {
    async fn product(&self, product_id: ProductId) -> Result<Product, CartError> {
        let product: Product = self.fetch(product_path(product_id)).await.map_err(|e| {
            tracing::warn!(product_id = %product_id, error = %e, "product lookup failed");
            CartError::from(e)
        })?;
        Ok(product)
    }
}
