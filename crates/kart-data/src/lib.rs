//! HTTP client and the remote stock service for Kart.
//!
//! [`HttpStockService`] answers the cart store's stock and catalog
//! questions from a JSON API through a small [`FetchClient`] that carries a
//! base URL and default headers.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kart_data::{FetchClient, HttpStockService};
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3333");
//! let service = Arc::new(HttpStockService::new(client));
//!
//! let level = service.stock(ProductId::new(1)).await?;
//! let product = service.product(ProductId::new(1)).await?;
//! ```

mod error;
mod request;
mod response;
mod stock;

pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;
pub use stock::{product_path, stock_path, HttpStockService};

/// HTTP client for outbound requests.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone, Default)]
pub struct FetchClient {
    inner: reqwest::Client,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `base_url` to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        let mut builder = RequestBuilder::new(self.inner.clone(), self.resolve(url.into()));
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        builder
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url,
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, HttpStockService, Response};
}
