//! # shopfront-store: Async Cart & Catalog Stores
//!
//! Wraps the pure types from `shopfront-core` in observable stores that talk
//! to storage and to the catalog endpoint.
//!
//! ## Store Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Wiring                                     │
//! │                                                                         │
//! │   ShopConfig ──────────────┬───────────────────────────┐               │
//! │   (defaults/TOML/env)      │                           │               │
//! │                            ▼                           ▼               │
//! │                  ┌──────────────────┐        ┌──────────────────┐      │
//! │                  │ FileStore /      │        │ HttpCatalog-     │      │
//! │                  │ MemoryStore      │        │ Fetcher / FnF.   │      │
//! │                  │ (KeyValueStore)  │        │ (CatalogFetcher) │      │
//! │                  └────────┬─────────┘        └────────┬─────────┘      │
//! │                           │ Arc<dyn ..>               │ Arc<dyn ..>    │
//! │                           ▼                           ▼                │
//! │                  ┌──────────────────┐        ┌──────────────────┐      │
//! │                  │    CartStore     │        │   CatalogStore   │      │
//! │                  │ watch<Cart>      │        │ watch<Catalog-   │      │
//! │                  │                  │        │       State>     │      │
//! │                  └────────┬─────────┘        └────────┬─────────┘      │
//! │                           │  subscribe()              │ subscribe()    │
//! │                           └─────────────┬─────────────┘                │
//! │                                         ▼                              │
//! │                             UI / composition root                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//! ```rust,no_run
//! use std::sync::Arc;
//! use shopfront_store::{CartStore, CatalogStore, HttpCatalogFetcher, MemoryStore, ShopConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ShopConfig::load(None)?;
//!
//! let cart = CartStore::with_key(Arc::new(MemoryStore::new()), config.storage_key());
//! cart.hydrate().await;
//!
//! let catalog = CatalogStore::start(Arc::new(HttpCatalogFetcher::from_config(&config.catalog)?));
//! let state = catalog.wait_until_settled().await;
//!
//! if let Some(product) = state.products.first() {
//!     if let Some(variant) = product.default_variant() {
//!         cart.add_to_cart(product, variant).wait().await?;
//!     }
//! }
//! println!("Total: {}", cart.get_total_price());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod catalog_store;
pub mod config;
pub mod error;
pub mod fetch;
pub mod persistence;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart_store::{CartStore, HydrateOutcome, PendingPersist};
pub use catalog_store::CatalogStore;
pub use config::{CartSettings, CatalogSettings, ShopConfig};
pub use error::{FetchError, FetchResult, StoreError, StoreResult};
pub use fetch::{CatalogFetcher, FnFetcher, HttpCatalogFetcher};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
