//! Kart CLI - Command line front end for the shopping cart.
//!
//! Commands:
//! - `kart add <id>` - Add one unit of a product
//! - `kart remove <id>` - Remove a product line
//! - `kart set <id> <amount>` - Set a line's quantity
//! - `kart show` - Print the cart
//! - `kart clear` - Empty the cart
//! - `kart config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, Outcome, ProductArgs, SetArgs};

/// Kart - Keep a stock-checked shopping cart from the terminal
#[derive(Parser)]
#[command(name = "kart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add(ProductArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Set the quantity of a product already in the cart
    Set(SetArgs),

    /// Show the cart
    Show,

    /// Remove every product from the cart
    Clear,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose) {
        ctx.output.warn(&format!("Logging disabled: {:#}", e));
    }

    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Set(args) => commands::cart::set(args, &ctx).await,
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Clear => commands::cart::clear(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    match result {
        Ok(Outcome::Done) => Ok(()),
        // Already reported through the notification sink.
        Ok(Outcome::Failed) => std::process::exit(1),
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
