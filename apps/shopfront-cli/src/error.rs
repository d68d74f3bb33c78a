//! # CLI Error Type
//!
//! Everything a command can fail with, mapped to one message and a
//! non-zero exit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreError (config)        ──► CliError::Config                       │
//! │  CatalogState.error         ──► CliError::CatalogUnavailable           │
//! │  lookup miss                ──► ProductNotFound / VariantNotFound      │
//! │  ValidationError            ──► CliError::NotPurchasable               │
//! │  PendingPersist::wait() Err ──► CliError::Persist                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use shopfront_core::ValidationError;
use shopfront_store::{FetchError, StoreError};

/// Result type alias for commands.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(StoreError),

    /// Fetcher could not be built.
    #[error("{0}")]
    Fetcher(#[from] FetchError),

    /// The catalog fetch failed and no products are available.
    #[error("{0}")]
    CatalogUnavailable(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Variant '{variant_id}' not found in product '{product_id}'")]
    VariantNotFound {
        product_id: String,
        variant_id: String,
    },

    /// The variant exists but cannot be bought.
    #[error("Cannot add to cart: {0}")]
    NotPurchasable(#[from] ValidationError),

    /// The cart changed in memory but was not saved.
    #[error("Cart was not saved: {0}")]
    Persist(StoreError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}
