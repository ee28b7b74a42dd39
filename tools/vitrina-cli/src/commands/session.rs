//! Action script replay.
//!
//! A script is a list of store actions, either a bare JSON array or a table
//! with an `actions` list (JSON or TOML):
//!
//! ```toml
//! [[actions]]
//! action = "add_to_cart"
//! product_id = "1"
//! size = "M"
//! color = "Negro"
//! quantity = 2
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vitrina_commerce::{Action, Storefront};

use super::{SessionArgs, SessionCommand};
use crate::context::Context;

/// Run the session command.
pub fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SessionCommand::Run { script, strict } => run_script(&script, strict, ctx),
    }
}

/// A list of actions to replay.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Script {
    /// Load a script; `.json` files are JSON, anything else is TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        let is_json = path.extension().map_or(false, |ext| ext == "json");
        Self::parse(&content, is_json)
            .with_context(|| format!("Failed to parse script: {}", path.display()))
    }

    /// Parse script text.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if !json {
            return Ok(toml::from_str(content)?);
        }
        let value: serde_json::Value = serde_json::from_str(content)?;
        if value.is_array() {
            Ok(Self {
                actions: serde_json::from_value(value)?,
            })
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }
}

/// Outcome of replaying a script.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: usize,
}

/// Dispatch every action in order.
///
/// Rejected actions leave the store unchanged. They are reported and
/// skipped, or abort the replay when `strict` is set.
pub fn replay(store: &mut Storefront, script: Script, strict: bool, ctx: &Context) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();

    for (index, action) in script.actions.into_iter().enumerate() {
        let label = format!("#{} {}", index + 1, action_name(&action));
        match store.dispatch(action) {
            Ok(()) => {
                if ctx.output.is_verbose() {
                    ctx.output.info(&format!("Action {} applied", label));
                }
                report.applied += 1;
            }
            Err(e) if strict => {
                return Err(e).with_context(|| format!("Action {} was rejected", label));
            }
            Err(e) => {
                warn!(action = %label, error = %e, "action rejected");
                ctx.output.warn(&format!("Action {} rejected: {}", label, e));
                report.rejected += 1;
            }
        }
    }

    info!(applied = report.applied, rejected = report.rejected, "script replayed");
    Ok(report)
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::AddItem(_) => "add_item",
        Action::AddToCart { .. } => "add_to_cart",
        Action::RemoveItem { .. } => "remove_item",
        Action::UpdateQuantity { .. } => "update_quantity",
        Action::ClearCart => "clear_cart",
        Action::ToggleFavorite(_) => "toggle_favorite",
        Action::ToggleFavoriteProduct { .. } => "toggle_favorite_product",
    }
}

fn run_script(path: &str, strict: bool, ctx: &Context) -> Result<()> {
    let script = Script::load(&ctx.resolve_path(path))?;
    if script.actions.is_empty() {
        bail!("Script has no actions: {}", path);
    }

    let mut store = ctx.storefront()?;
    let report = replay(&mut store, script, strict, ctx)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "applied": report.applied,
            "rejected": report.rejected,
            "cart": store.cart(),
            "favorites": store.favorites(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Replayed {} action(s), {} rejected",
        report.applied + report.rejected,
        report.rejected
    ));
    print_cart(&store, ctx)?;
    print_favorites(&store, ctx);

    Ok(())
}

/// Print the cart lines and totals in display currency.
pub fn print_cart(store: &Storefront, ctx: &Context) -> Result<()> {
    let cart = store.cart();
    let fmt = store.formatter();

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("The cart is empty");
        return Ok(());
    }

    let widths: [usize; 6] = [28, 8, 10, 5, 14, 14];
    ctx.output
        .table_row(&["PRODUCT", "SIZE", "COLOR", "QTY", "PRICE", "TOTAL"], &widths);
    for item in cart.items() {
        let qty = item.quantity.to_string();
        let price = fmt.format(&item.unit_price);
        let total = fmt.format(&item.total_price()?);
        ctx.output.table_row(
            &[&item.name, &item.size, &item.color, &qty, &price, &total],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Subtotal", &fmt.format(&cart.subtotal()));
    ctx.output.kv("Shipping", &fmt.format(&cart.shipping_fee()));
    ctx.output.kv(
        &format!("Tax ({:.0}%)", cart.tax_rate() * 100.0),
        &fmt.format(&cart.tax()),
    );
    ctx.output.kv("Total", &fmt.format(&cart.total()?));

    Ok(())
}

fn print_favorites(store: &Storefront, ctx: &Context) {
    ctx.output.header("Favorites");
    if store.favorites().is_empty() {
        ctx.output.info("No favorites yet");
        return;
    }
    for item in store.favorites().items().values() {
        ctx.output.list_item(&format!(
            "{} ({})",
            item.name,
            store.formatter().format(&item.price)
        ));
    }
}
