//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use kart_cache::{CartSnapshotStore, FileStore};
use kart_commerce::cart::{CartStore, Messages};
use kart_data::{FetchClient, HttpStockService};

use crate::config::KartConfig;
use crate::output::{Output, OutputSink};

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: KartConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => KartConfig::find(&cwd),
        };
        let config = match &config_path {
            Some(path) => KartConfig::load(path)?,
            None => KartConfig::default(),
        }
        .with_env();

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory the cart snapshot lives in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Notification text for the configured locale.
    pub fn messages(&self) -> Messages {
        let locale = &self.config.messages.locale;
        Messages::for_locale(locale).unwrap_or_else(|| {
            tracing::warn!(%locale, "unknown locale, using English messages");
            Messages::english()
        })
    }

    /// Build a cart store over the configured API and storage.
    pub async fn open_store(&self) -> Result<CartStore> {
        let mut client = FetchClient::new().with_base_url(&self.config.api.base_url);
        for (key, value) in &self.config.api.headers {
            client = client.with_default_header(key, value);
        }
        let service = Arc::new(HttpStockService::new(client));

        let dir = self.storage_dir();
        let files = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage directory: {}", dir.display()))?;
        let persistence = Arc::new(CartSnapshotStore::with_key(
            files,
            self.config.storage.key.as_str(),
        ));

        self.output.debug(&format!(
            "api: {}, storage: {}",
            self.config.api.base_url,
            dir.display()
        ));

        let store = CartStore::builder(service.clone(), service, persistence)
            .with_notifier(Arc::new(OutputSink::new(self.output.clone())))
            .with_messages(self.messages())
            .initialize()
            .await
            .context("Failed to restore the cart")?;

        Ok(store)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
