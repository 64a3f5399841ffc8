//! CLI configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that replaces `api.base_url`.
pub const API_URL_ENV: &str = "KART_API_URL";

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["kart.toml", ".kart.toml", "kart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KartConfig {
    /// Store API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the cart snapshot is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Notification text.
    #[serde(default)]
    pub messages: MessagesConfig,
}

impl KartConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Find the nearest config file, walking up from `start`.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply environment overrides.
    pub fn with_env(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        self
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Store API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `stock/{id}` and `products/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            headers: BTreeMap::new(),
        }
    }
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the key-value files.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_dir() -> String {
    ".kart".to_string()
}

fn default_storage_key() -> String {
    kart_cache::DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Notification text configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Locale tag: `en` or `pt-BR`.
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

/// Generate a default kart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Kart configuration

[api]
base_url = "{base_url}"
# Overridden by ${env} when set.

[api.headers]
# Authorization = "Bearer <token>"

[storage]
dir = "{dir}"
key = "{key}"

[logging]
# Used when RUST_LOG is unset.
level = "warn"
format = "compact"

[messages]
# "en" or "pt-BR"
locale = "en"
"#,
        base_url = default_base_url(),
        env = API_URL_ENV,
        dir = default_storage_dir(),
        key = default_storage_key(),
    )
}
