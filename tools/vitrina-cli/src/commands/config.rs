//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, json } => init_config(force, json, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let store = &ctx.config.store;
    ctx.output.info("[store]");
    ctx.output.kv("currency", store.currency.code());
    ctx.output.kv("tax_rate", &store.tax_rate.to_string());
    ctx.output.kv("shipping_fee", &store.shipping_fee.display());

    ctx.output.info("[store.display]");
    ctx.output.kv("currency", store.display.currency.code());
    ctx.output.kv("rate", &store.display.rate.to_string());
    ctx.output.kv(
        "grouping_separator",
        &format!("{:?}", store.display.grouping_separator),
    );

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(bundled sample)"),
    );

    Ok(())
}

fn init_config(force: bool, json: bool, ctx: &Context) -> Result<()> {
    let name = if json { "vitrina.json" } else { "vitrina.toml" };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if json {
        CliConfig::default().save(&config_path.to_string_lossy())?;
    } else {
        std::fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut warnings: Vec<String> = Vec::new();
    let store = &ctx.config.store;

    if let Err(e) = store.validate() {
        ctx.output.error(&format!("Error: {}", e));
        bail!("Configuration is invalid");
    }

    if store.display.currency == store.currency && store.display.rate != 1.0 {
        warnings.push(format!(
            "display.rate is {} but display and store currency are both {}",
            store.display.rate, store.currency
        ));
    }
    if let Err(e) = ctx.config.catalog.load(&ctx.config_dir(), store.currency) {
        bail!("Catalog could not be loaded: {:#}", e);
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.success("Configuration is valid (with warnings)");
    }

    Ok(())
}
