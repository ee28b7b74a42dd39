//! Interactive checkout wizard.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Password, Select};
use vitrina_commerce::catalog::ProductCatalog;
use vitrina_commerce::checkout::{CheckoutFlow, CheckoutStep, OrderSummary, PaymentDetails, ShippingInfo};
use vitrina_commerce::Storefront;

use super::session::{print_cart, replay, Script};
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.storefront()?;

    match args.script {
        Some(ref path) => {
            let script = Script::load(&ctx.resolve_path(path))?;
            replay(&mut store, script, false, ctx)?;
        }
        None => pick_products(&mut store, ctx)?,
    }

    if store.cart().is_empty() {
        bail!("The cart is empty. Add products first or pass --script.");
    }
    print_cart(&store, ctx)?;

    let mut flow = store.begin_checkout()?;
    let Some(order) = run_wizard(&mut store, &mut flow, ctx)? else {
        ctx.output.warn("Checkout cancelled");
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    print_order(&order, &store, ctx);

    Ok(())
}

/// Fill the cart by choosing products from the catalog.
fn pick_products(store: &mut Storefront, ctx: &Context) -> Result<()> {
    ctx.output.header("Add products");

    loop {
        let labels: Vec<String> = store
            .catalog()
            .products()
            .iter()
            .map(|p| format!("{} ({})", p.name, store.formatter().format(&p.price)))
            .collect();
        if labels.is_empty() {
            bail!("The catalog has no products");
        }
        let index = Select::new()
            .with_prompt("Product")
            .items(&labels)
            .default(0)
            .interact()?;
        let product = store.catalog().products()[index].clone();

        let size = choose("Size", &product.sizes)?;
        let color = choose("Color", &product.colors)?;
        let quantity: i64 = Input::new()
            .with_prompt("Quantity")
            .default(1)
            .interact_text()?;

        match store.add_to_cart(&product.id, &size, &color, quantity) {
            Ok(()) => ctx.output.success(&format!("Added {} x {}", quantity, product.name)),
            Err(e) => ctx.output.warn(&e.to_string()),
        }

        let more = Confirm::new()
            .with_prompt("Add another product?")
            .default(false)
            .interact()?;
        if !more {
            return Ok(());
        }
    }
}

fn choose(prompt: &str, options: &[String]) -> Result<String> {
    match options {
        [] => Ok(String::new()),
        [only] => Ok(only.clone()),
        _ => {
            let index = Select::new()
                .with_prompt(prompt)
                .items(options)
                .default(0)
                .interact()?;
            Ok(options[index].clone())
        }
    }
}

/// Walk the flow until the order is placed or the shopper cancels.
fn run_wizard(
    store: &mut Storefront,
    flow: &mut CheckoutFlow,
    ctx: &Context,
) -> Result<Option<OrderSummary>> {
    loop {
        let step = flow.step();
        if step == CheckoutStep::Complete {
            return Ok(flow.order().cloned());
        }
        ctx.output.step(
            usize::from(step.number()),
            usize::from(CheckoutStep::INPUT_STEPS),
            step.display_name(),
        );

        match step {
            CheckoutStep::Shipping => {
                let info = prompt_shipping(flow.shipping().cloned().unwrap_or_default())?;
                match flow.set_shipping(info) {
                    Ok(()) => {
                        flow.advance()?;
                    }
                    Err(e) => ctx.output.warn(&e.to_string()),
                }
            }
            CheckoutStep::Payment => {
                let details = prompt_payment()?;
                match flow.set_payment(&details) {
                    Ok(()) => {
                        flow.advance()?;
                    }
                    Err(e) => ctx.output.warn(&e.to_string()),
                }
            }
            CheckoutStep::Review => {
                print_review(flow, store, ctx)?;
                let choice = Select::new()
                    .with_prompt("Next")
                    .items(&["Place order", "Edit payment", "Edit shipping", "Cancel"])
                    .default(0)
                    .interact()?;
                match choice {
                    0 => {
                        store.place_order(flow)?;
                    }
                    1 => {
                        flow.go_back()?;
                    }
                    2 => {
                        flow.go_back()?;
                        flow.go_back()?;
                    }
                    _ => return Ok(None),
                }
            }
            CheckoutStep::Complete => {}
        }
    }
}

fn prompt_shipping(current: ShippingInfo) -> Result<ShippingInfo> {
    Ok(ShippingInfo {
        first_name: ask("First name", &current.first_name)?,
        last_name: ask("Last name", &current.last_name)?,
        address1: ask("Address", &current.address1)?,
        city: ask("City", &current.city)?,
        state: ask("State", &current.state)?,
        zip: ask("Postal code", &current.zip)?,
        phone: ask("Phone", &current.phone)?,
    })
}

fn prompt_payment() -> Result<PaymentDetails> {
    Ok(PaymentDetails {
        card_name: ask("Name on card", "")?,
        card_number: ask("Card number", "")?,
        expiry: ask("Expiry (MM/YY)", "")?,
        cvv: Password::new().with_prompt("CVV").interact()?,
    })
}

fn ask(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn print_review(flow: &CheckoutFlow, store: &Storefront, ctx: &Context) -> Result<()> {
    print_cart(store, ctx)?;

    if let Some(ship_to) = flow.shipping() {
        ctx.output.kv("Ship to", &ship_to.full_name());
        ctx.output.kv("Address", &ship_to.one_line());
        ctx.output.kv("Phone", &ship_to.phone);
    }
    if let Some(payment) = flow.payment() {
        ctx.output.kv("Card", &payment.masked_number());
        ctx.output.kv(
            "Expires",
            &format!("{:02}/{:02}", payment.expiry_month, payment.expiry_year),
        );
    }

    Ok(())
}

fn print_order(order: &OrderSummary, store: &Storefront, ctx: &Context) {
    let fmt = store.formatter();

    ctx.output.success(&format!("Order {} placed", order.id));
    ctx.output.kv(
        "Placed at",
        &order.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    ctx.output.kv("Items", &order.item_count().to_string());
    ctx.output.kv("Subtotal", &fmt.format(&order.subtotal));
    ctx.output.kv("Shipping", &fmt.format(&order.shipping));
    ctx.output.kv("Tax", &fmt.format(&order.tax));
    ctx.output.kv("Total", &fmt.format(&order.total));
    ctx.output.kv("Ship to", &order.ship_to.one_line());
    ctx.output.kv("Card", &order.payment.masked_number());
}
