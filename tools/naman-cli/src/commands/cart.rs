//! Cart commands.
//!
//! Each command hydrates the cart from the data directory, applies one
//! operation (which persists) and prints the result.

use anyhow::Result;
use dialoguer::Confirm;
use naman_storage::Storage;
use naman_store::cart::{CartState, CartStore, NewCartItem};
use naman_store::ids::ProductId;

use super::{AddArgs, ClearArgs, ProductArg, SetArgs};
use crate::context::Context;
use crate::output::{format_price, format_quantity};

/// Print the cart.
pub fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    print_cart(cart.state(), ctx);
    Ok(())
}

/// Add a product line.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    let mut item = NewCartItem::new(args.product_id.as_str(), args.name, args.mode, args.price)
        .with_min_order_quantity(args.min);
    if let Some(slug) = args.slug {
        item = item.with_slug(slug);
    }
    if let Some(image) = args.image {
        item = item.with_image(image);
    }

    cart.add_item(item, args.quantity);
    report_line(&cart, &ProductId::new(args.product_id), ctx);
    print_cart(cart.state(), ctx);
    Ok(())
}

/// Set a line's quantity.
pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(args.product_id);

    require_line(&cart, &id, ctx);
    cart.update_quantity(&id, args.quantity);
    report_line(&cart, &id, ctx);
    print_cart(cart.state(), ctx);
    Ok(())
}

/// Step a line up by one.
pub fn increment(args: ProductArg, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(args.product_id);

    require_line(&cart, &id, ctx);
    cart.increment_quantity(&id);
    report_line(&cart, &id, ctx);
    print_cart(cart.state(), ctx);
    Ok(())
}

/// Step a line down by one.
pub fn decrement(args: ProductArg, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(args.product_id);

    require_line(&cart, &id, ctx);
    cart.decrement_quantity(&id);
    report_line(&cart, &id, ctx);
    print_cart(cart.state(), ctx);
    Ok(())
}

/// Drop a line.
pub fn remove(args: ProductArg, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(args.product_id);

    require_line(&cart, &id, ctx);
    cart.remove_item(&id);
    ctx.output.success(&format!("Removed {}", id));
    print_cart(cart.state(), ctx);
    Ok(())
}

/// Empty the cart.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    if cart.state().is_empty() {
        ctx.output.info("Cart is already empty.");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} lines?", cart.state().line_count()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled.");
            return Ok(());
        }
    }

    cart.clear_cart();
    ctx.output.success("Cart cleared");
    print_cart(cart.state(), ctx);
    Ok(())
}

/// Warn when an operation targets a product that is not in the cart. The
/// operation still runs; it is a no-op in the store.
fn require_line<S: Storage>(cart: &CartStore<S>, id: &ProductId, ctx: &Context) {
    if cart.find(id).is_none() {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
}

fn report_line<S: Storage>(cart: &CartStore<S>, id: &ProductId, ctx: &Context) {
    match cart.find(id) {
        Some(item) => {
            let max = cart.limits().max_for(item.selling_mode);
            let mut msg = format!(
                "{}: {} {}",
                id,
                format_quantity(item.quantity),
                item.selling_mode.unit()
            );
            if item.quantity >= max {
                msg.push_str(" (limit reached)");
            }
            ctx.output.success(&msg);
        }
        None => ctx.output.info(&format!("{} is not in the cart", id)),
    }
}

fn print_cart(state: &CartState, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(state);
        return;
    }

    ctx.output.header("Cart");
    ctx.output.debug(&format!("data dir: {}", ctx.data_dir.display()));

    if state.is_empty() {
        ctx.output.info("Cart is empty.");
        return;
    }

    let widths = [20, 28, 12, 10, 10];
    ctx.output
        .table_row(&["PRODUCT", "NAME", "QUANTITY", "PRICE", "TOTAL"], &widths);
    for item in &state.items {
        let quantity = format!(
            "{} {}",
            format_quantity(item.quantity),
            item.selling_mode.unit()
        );
        ctx.output.table_row(
            &[
                item.product_id.as_str(),
                &item.name,
                &quantity,
                &format_price(item.price),
                &format_price(item.line_total()),
            ],
            &widths,
        );
    }

    ctx.output.kv("lines", &state.line_count().to_string());
    ctx.output.kv("subtotal", &format_price(state.subtotal()));
}
