//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for cart output.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = env_filter(config, verbose)?;

    let json_layer = (config.format == LogFormat::Json)
        .then(|| fmt::layer().json().flatten_event(true).with_writer(std::io::stderr));
    let text_layer = (config.format == LogFormat::Compact)
        .then(|| fmt::layer().compact().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}

fn env_filter(config: &LoggingConfig, verbose: bool) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = if verbose { "debug" } else { config.level.as_str() };
    EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {}", level))
}
