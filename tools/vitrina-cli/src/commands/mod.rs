//! CLI command implementations.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod session;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products matching the given filters.
    List {
        /// Only products in this category.
        #[arg(long)]
        category: Option<String>,

        /// Free text matched against name and description.
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order: newest, price-asc, price-desc or rating.
        #[arg(long, default_value = "newest")]
        sort: String,

        /// Only discounted products.
        #[arg(long)]
        on_sale: bool,

        /// Minimum price, in store currency units.
        #[arg(long)]
        min: Option<f64>,

        /// Maximum price, in store currency units.
        #[arg(long)]
        max: Option<f64>,

        /// Only products with units in stock.
        #[arg(long)]
        in_stock: bool,

        /// Only products offered in this size.
        #[arg(long)]
        size: Option<String>,

        /// Only products offered in this color.
        #[arg(long)]
        color: Option<String>,

        /// Minimum average rating.
        #[arg(long)]
        min_rating: Option<f64>,
    },
    /// Show details for one product.
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Replay an action script against a fresh storefront.
    Run {
        /// Script file (JSON or TOML).
        script: String,

        /// Stop at the first rejected action.
        #[arg(long)]
        strict: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Action script that fills the cart first.
    #[arg(short, long)]
    pub script: Option<String>,
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

        /// Write vitrina.json instead of vitrina.toml.
        #[arg(long)]
        json: bool,
    },
    /// Validate the config file.
    Validate,
}
