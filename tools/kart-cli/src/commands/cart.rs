//! Cart commands.

use anyhow::Result;
use kart_commerce::cart::{CartStore, UpdateProductAmount};
use kart_commerce::{Currency, ProductId};

use super::{Outcome, ProductArgs, SetArgs};
use crate::context::Context;

/// Add one unit of a product.
pub async fn add(args: ProductArgs, ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store().await?;
    let outcome = Outcome::from(store.add_product(ProductId::new(args.id)).await);
    finish(&store, outcome, ctx)
}

/// Remove a product line.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store().await?;
    let outcome = Outcome::from(store.remove_product(ProductId::new(args.id)).await);
    finish(&store, outcome, ctx)
}

/// Set a line's quantity.
pub async fn set(args: SetArgs, ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store().await?;
    if args.amount <= 0 {
        ctx.output
            .debug("Quantity must be at least 1; cart left unchanged");
    }
    let update = UpdateProductAmount::new(ProductId::new(args.id), args.amount);
    let outcome = Outcome::from(store.update_product_amount(update).await);
    finish(&store, outcome, ctx)
}

/// Print the cart.
pub async fn show(ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store().await?;
    ctx.output.cart(&store.cart(), Currency::default());
    Ok(Outcome::Done)
}

/// Empty the cart.
pub async fn clear(ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store().await?;
    let outcome = Outcome::from(store.clear().await);
    if outcome == Outcome::Done {
        ctx.output.success("Cart cleared");
    }
    Ok(outcome)
}

fn finish(store: &CartStore, outcome: Outcome, ctx: &Context) -> Result<Outcome> {
    ctx.output.cart(&store.cart(), Currency::default());
    Ok(outcome)
}
