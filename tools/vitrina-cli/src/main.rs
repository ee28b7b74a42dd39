//! Vitrina CLI - browse the catalog, replay cart sessions and check out.
//!
//! Commands:
//! - `vitrina catalog list|show` - Browse products
//! - `vitrina session run` - Replay an action script
//! - `vitrina checkout` - Interactive checkout wizard
//! - `vitrina config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, CheckoutArgs, ConfigArgs, SessionArgs};

/// Vitrina - storefront catalog, cart and checkout from the terminal
#[derive(Parser)]
#[command(name = "vitrina")]
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
    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Replay cart and favorites actions
    Session(SessionArgs),

    /// Check out a cart interactively
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "vitrina=debug,vitrina_commerce=debug"
    } else {
        "vitrina=info,vitrina_commerce=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Session(args) => commands::session::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_catalog_flags_parse() {
        let cli = Cli::try_parse_from([
            "vitrina", "-c", "shop.toml", "catalog", "list", "--category", "mujer", "--min-rating", "4.5",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("shop.toml"));
        assert!(matches!(cli.command, Commands::Catalog(_)));
    }
}
