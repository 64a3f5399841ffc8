//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand, Outcome};
use crate::config::{generate_default_config, KartConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<Outcome> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(&path, force, ctx),
    }?;
    Ok(Outcome::Done)
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    for key in ctx.config.api.headers.keys() {
        ctx.output.kv("header", key);
    }

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("key", &ctx.config.storage.key);

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    ctx.output.info("[messages]");
    ctx.output.kv("locale", &ctx.config.messages.locale);

    Ok(())
}

fn init_config(path: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().is_some_and(|ext| ext == "json") {
        KartConfig::default().save(&config_path)?;
    } else {
        std::fs::write(&config_path, generate_default_config()).with_context(|| {
            format!("Failed to write config file: {}", config_path.display())
        })?;
    }

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
