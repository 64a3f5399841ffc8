//! Cache error types.

use kart_commerce::CartError;
use thiserror::Error;

/// Errors that can occur when using a Key-Value store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}

impl From<CacheError> for CartError {
    fn from(e: CacheError) -> Self {
        CartError::Transport(e.to_string())
    }
}
