//! # Catalog Commands
//!
//! Read-only views of the product list.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ shopfront products                                                  │
//! │  p1   Classic Tee        10.00 USD   In stock                          │
//! │  p2   Hoodie             45.50 USD   Only 2 left                       │
//! │                                                                         │
//! │  $ shopfront show p2                                                   │
//! │  Hoodie                                                                │
//! │  Warm and soft.                                                        │
//! │  image: https://cdn.example.com/p2.png                                 │
//! │    * v1  Small    45.50 USD   Only 2 left                              │
//! │      v2  Large    47.00 USD   Sold out                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use super::{find_product, stock_label, App};
use crate::error::CliResult;

/// Prints one line per product with its default variant's price.
pub async fn list_products(app: &App) -> CliResult<()> {
    let catalog = app.catalog().await?;
    let products = catalog.products();
    debug!(count = products.len(), "list_products command");

    if products.is_empty() {
        println!("No products.");
        return Ok(());
    }

    for product in &products {
        match product.default_variant() {
            Some(variant) => println!(
                "{:<12} {:<28} {:>14}   {}",
                product.id,
                product.title,
                variant.price.to_string(),
                stock_label(variant)
            ),
            None => println!("{:<12} {}", product.id, product.title),
        }
    }

    Ok(())
}

/// Prints a product's details. `*` marks the variant `add` picks by default.
pub async fn show_product(app: &App, product_id: &str) -> CliResult<()> {
    let catalog = app.catalog().await?;
    let product = find_product(&catalog, product_id)?;
    debug!(product_id, "show_product command");

    println!("{}", product.title);
    if !product.description.is_empty() {
        println!("{}", product.description);
    }

    let default_id = product.default_variant().map(|v| v.id.clone());
    if let Some(variant) = product.default_variant() {
        if let Some(url) = product.display_image_url(variant) {
            println!("image: {}", url);
        }
    }

    for variant in &product.variants {
        let marker = if default_id.as_deref() == Some(variant.id.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(
            "  {} {:<10} {:<16} {:>14}   {}",
            marker,
            variant.id,
            variant.title,
            variant.price.to_string(),
            stock_label(variant)
        );
    }

    Ok(())
}
