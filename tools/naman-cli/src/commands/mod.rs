//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};
use naman_store::cart::SellingMode;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id.
    pub product_id: String,

    /// Display name.
    #[arg(short, long)]
    pub name: String,

    /// Unit price.
    #[arg(short, long)]
    pub price: f64,

    /// Selling mode: meter or piece.
    #[arg(short, long, default_value = "piece")]
    pub mode: SellingMode,

    /// Quantity to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: f64,

    /// Minimum order quantity for the line.
    #[arg(long, default_value = "1")]
    pub min: f64,

    /// Product page slug (default: the product id).
    #[arg(long)]
    pub slug: Option<String>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product id.
    pub product_id: String,

    /// New quantity.
    pub quantity: f64,
}

/// A single product id.
#[derive(Args)]
pub struct ProductArg {
    /// Product id.
    pub product_id: String,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
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
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
