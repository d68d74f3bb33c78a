//! # Command Handlers
//!
//! Each subcommand is a function over [`App`], which holds the loaded
//! config and the cart store. The catalog store is built on demand so that
//! cart-only commands never hit the network.
//!
//! ## Module Organization
//! - [`catalog`] - products, show
//! - [`cart`] - add, remove, clear, cart

pub mod cart;
pub mod catalog;

use std::sync::Arc;

use tracing::{debug, warn};

use shopfront_core::{Product, ProductVariant};
use shopfront_store::{
    CartStore, CatalogStore, FileStore, HttpCatalogFetcher, HydrateOutcome, ShopConfig,
};

use crate::args::Command;
use crate::error::{CliError, CliResult};

/// Stores and settings shared by the commands.
pub struct App {
    pub config: ShopConfig,
    pub cart: CartStore,
}

impl App {
    /// Builds the file-backed cart store and restores the saved cart.
    pub async fn open(config: ShopConfig) -> Self {
        let storage = Arc::new(FileStore::new(config.data_dir()));
        let cart = CartStore::with_key(storage, config.storage_key());

        match cart.hydrate().await {
            HydrateOutcome::Discarded { reason } => {
                warn!(%reason, "Saved cart was unreadable and has been reset");
            }
            outcome => debug!(?outcome, "Cart hydrated"),
        }

        App { config, cart }
    }

    /// Starts the catalog store and waits for its first fetch.
    ///
    /// Fails only if the fetch failed and left no products to show.
    pub async fn catalog(&self) -> CliResult<Arc<CatalogStore>> {
        let fetcher = HttpCatalogFetcher::from_config(&self.config.catalog)?;
        let catalog = CatalogStore::start(Arc::new(fetcher));

        let state = catalog.wait_until_settled().await;
        match state.error {
            Some(message) if state.products.is_empty() => {
                Err(CliError::CatalogUnavailable(message))
            }
            _ => Ok(catalog),
        }
    }
}

/// Runs one subcommand.
pub async fn dispatch(app: &App, command: Command) -> CliResult<()> {
    match command {
        Command::Products => catalog::list_products(app).await,
        Command::Show { product } => catalog::show_product(app, &product).await,
        Command::Add { product, variant } => cart::add(app, &product, variant.as_deref()).await,
        Command::Remove { product, variant } => cart::remove(app, &product, &variant).await,
        Command::Clear => cart::clear(app).await,
        Command::Cart { json } => cart::show_cart(app, json),
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Looks up a product in the catalog.
fn find_product(catalog: &CatalogStore, product_id: &str) -> CliResult<Product> {
    catalog
        .find_product(product_id)
        .ok_or_else(|| CliError::ProductNotFound(product_id.to_string()))
}

/// Picks the requested variant, or the product's default one.
fn pick_variant<'a>(
    product: &'a Product,
    variant_id: Option<&str>,
) -> CliResult<&'a ProductVariant> {
    let found = match variant_id {
        Some(id) => product.find_variant(id),
        None => product.default_variant(),
    };

    found.ok_or_else(|| CliError::VariantNotFound {
        product_id: product.id.clone(),
        variant_id: variant_id.unwrap_or("<default>").to_string(),
    })
}

/// One-word stock label as shown next to a variant.
fn stock_label(variant: &ProductVariant) -> String {
    if !variant.is_available() {
        "Sold out".to_string()
    } else if variant.is_low_stock() {
        format!("Only {} left", variant.quantity_available)
    } else {
        "In stock".to_string()
    }
}
