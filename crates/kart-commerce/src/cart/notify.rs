//! Notification messages and sinks.

use crate::ports::NotificationSink;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Fixed user-facing message per failure category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    /// Requested amount exceeds available stock.
    pub stock_unavailable: String,
    /// Adding a product failed.
    pub add_failed: String,
    /// Removing a product failed.
    pub remove_failed: String,
    /// Changing a product amount failed.
    pub update_failed: String,
    /// Clearing the cart failed.
    pub clear_failed: String,
}

impl Messages {
    /// English messages.
    pub fn english() -> Self {
        Self {
            stock_unavailable: "Requested quantity is out of stock".to_string(),
            add_failed: "Error adding product".to_string(),
            remove_failed: "Error removing product".to_string(),
            update_failed: "Error changing product quantity".to_string(),
            clear_failed: "Error clearing cart".to_string(),
        }
    }

    /// Brazilian Portuguese messages, as shown by the RocketShoes storefront.
    pub fn pt_br() -> Self {
        Self {
            stock_unavailable: "Quantidade solicitada fora de estoque".to_string(),
            add_failed: "Erro na adição do produto".to_string(),
            remove_failed: "Erro na remoção do produto".to_string(),
            update_failed: "Erro na alteração de quantidade do produto".to_string(),
            clear_failed: "Erro ao esvaziar o carrinho".to_string(),
        }
    }

    /// Look up a preset by locale tag (`en`, `pt-BR`).
    pub fn for_locale(locale: &str) -> Option<Self> {
        match locale.to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Some(Self::english()),
            "pt" | "pt-br" => Some(Self::pt_br()),
            _ => None,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

/// Sink that writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn error(&self, message: &str) {
        tracing::warn!(notification = message, "cart notification");
    }
}

/// Sink that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of notifications received.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Most recent notification.
    pub fn last(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl NotificationSink for RecordingSink {
    fn error(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
