//! # Cart Commands
//!
//! Cart manipulation from the command line.
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shopfront add p1 --variant v2                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog: find product, pick variant                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ensure_purchasable ──fail──► "Cannot add to cart: ..."               │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  cart.add_to_cart(..).wait()  (the process exits right after, so the   │
//! │       │                        write is awaited rather than dropped)   │
//! │       ▼                                                                 │
//! │  catalog.refresh_products()   stock figures reflect the add            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use shopfront_core::validation::ensure_purchasable;
use shopfront_core::{CartLineItem, CartSummary, CatalogPhase};

use super::{find_product, pick_variant, App};
use crate::error::{CliError, CliResult};

/// Cart output for `cart --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartResponse {
    items: Vec<CartLineItem>,
    summary: CartSummary,
}

/// Adds one unit of a variant, then refreshes the catalog.
pub async fn add(app: &App, product_id: &str, variant_id: Option<&str>) -> CliResult<()> {
    let catalog = app.catalog().await?;
    let product = find_product(&catalog, product_id)?;
    let variant = pick_variant(&product, variant_id)?;

    ensure_purchasable(&product, variant)?;

    app.cart
        .add_to_cart(&product, variant)
        .wait()
        .await
        .map_err(CliError::Persist)?;

    let quantity = app
        .cart
        .snapshot()
        .get_item(&product.id, &variant.id)
        .map(|item| item.quantity)
        .unwrap_or(0);
    info!(product_id = %product.id, variant_id = %variant.id, quantity, "Added to cart");

    if catalog.refresh_products().await == CatalogPhase::Error {
        warn!(
            error = catalog.error().as_deref().unwrap_or_default(),
            "Catalog refresh after add failed"
        );
    }

    println!(
        "Added {} ({}) - quantity {}. Cart total: {}",
        product.title,
        variant.title,
        quantity,
        app.cart.get_total_price()
    );
    Ok(())
}

/// Removes a line. Removing a line that is not there is not an error.
pub async fn remove(app: &App, product_id: &str, variant_id: &str) -> CliResult<()> {
    let existed = app.cart.snapshot().get_item(product_id, variant_id).is_some();

    app.cart
        .remove_from_cart(product_id, variant_id)
        .wait()
        .await
        .map_err(CliError::Persist)?;

    if existed {
        println!("Removed. Cart total: {}", app.cart.get_total_price());
    } else {
        println!("Not in cart: {}/{}", product_id, variant_id);
    }
    Ok(())
}

/// Empties the cart.
pub async fn clear(app: &App) -> CliResult<()> {
    app.cart.clear_cart().wait().await.map_err(CliError::Persist)?;
    println!("Cart cleared.");
    Ok(())
}

/// Prints the cart lines and total.
pub fn show_cart(app: &App, json: bool) -> CliResult<()> {
    debug!(json, "show_cart command");

    if json {
        let response = CartResponse {
            items: app.cart.cart_items(),
            summary: app.cart.summary(),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let items = app.cart.cart_items();
    if items.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }

    for item in &items {
        let line_total = item
            .line_total()
            .map(|amount| amount.to_fixed(2))
            .unwrap_or_else(|_| "-".to_string());
        println!(
            "{:<28} {:<16} x{:<4} {:>12}",
            item.product.title, item.variant.title, item.quantity, line_total
        );
    }
    println!("{:<28} {:<16} {:<5} {:>12}", "", "", "TOTAL", app.cart.get_total_price());

    Ok(())
}
