//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};
use kart_commerce::CartError;

/// How a command ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The cart rejected the operation and already told the user.
    Failed,
}

impl From<Result<(), CartError>> for Outcome {
    fn from(result: Result<(), CartError>) -> Self {
        match result {
            Ok(()) => Outcome::Done,
            Err(_) => Outcome::Failed,
        }
    }
}

/// Arguments naming a single product.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: i64,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product ID.
    pub id: i64,

    /// New quantity. Zero or less leaves the cart unchanged.
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// File to create; a `.json` path writes JSON.
        #[arg(default_value = "kart.toml")]
        path: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
