//! # Catalog Fetchers
//!
//! The catalog store does not know where products come from. It calls a
//! [`CatalogFetcher`] and records whatever that returns.
//!
//! ## Fetch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     HttpCatalogFetcher                                  │
//! │                                                                         │
//! │  endpoint configured? ──no──► FetchError::MissingEndpoint              │
//! │        │ yes                                                            │
//! │        ▼                                                                │
//! │  GET <endpoint>  ──transport error / timeout──► FetchError::Transport  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2xx status?  ──no──► FetchError::Status(code)                         │
//! │        │ yes                                                            │
//! │        ▼                                                                │
//! │  JSON array of Product? ──no──► FetchError::Decode                     │
//! │        │ yes                                                            │
//! │        ▼                                                                │
//! │  validate_catalog ──violation──► FetchError::InvalidCatalog            │
//! │        │ ok                                                             │
//! │        ▼                                                                │
//! │  Vec<Product>                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;

use shopfront_core::validation::validate_catalog;
use shopfront_core::Product;

use crate::config::CatalogSettings;
use crate::error::{FetchError, FetchResult};

/// Source of the product list.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetches the full product list.
    async fn fetch_products(&self) -> FetchResult<Vec<Product>>;
}

// =============================================================================
// HTTP Fetcher
// =============================================================================

/// Fetches the catalog with a GET against a configured URL.
#[derive(Debug, Clone)]
pub struct HttpCatalogFetcher {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpCatalogFetcher {
    /// Creates a fetcher. A `None` or blank endpoint is accepted; every
    /// fetch then fails with [`FetchError::MissingEndpoint`].
    pub fn new(endpoint: Option<String>, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(HttpCatalogFetcher { client, endpoint })
    }

    /// Creates a fetcher from the `[catalog]` config section.
    pub fn from_config(settings: &CatalogSettings) -> FetchResult<Self> {
        Self::new(settings.api_url.clone(), settings.timeout())
    }

    /// The configured endpoint, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
    async fn fetch_products(&self) -> FetchResult<Vec<Product>> {
        let endpoint = self.endpoint.as_deref().ok_or(FetchError::MissingEndpoint)?;

        debug!(endpoint, "Fetching catalog");
        let response = self
            .client
            .get(endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let products: Vec<Product> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        validate_catalog(&products)?;

        debug!(endpoint, count = products.len(), "Catalog fetched");
        Ok(products)
    }
}

// =============================================================================
// Closure Fetcher
// =============================================================================

/// Adapts an async closure into a [`CatalogFetcher`].
///
/// ```rust,no_run
/// use shopfront_core::Product;
/// use shopfront_store::fetch::FnFetcher;
/// use shopfront_store::FetchError;
///
/// let fetcher = FnFetcher::new(|| async { Ok::<Vec<Product>, FetchError>(Vec::new()) });
/// ```
pub struct FnFetcher<F> {
    f: F,
}

impl<F> FnFetcher<F> {
    pub fn new(f: F) -> Self {
        FnFetcher { f }
    }
}

#[async_trait]
impl<F, Fut> CatalogFetcher for FnFetcher<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = FetchResult<Vec<Product>>> + Send + 'static,
{
    async fn fetch_products(&self) -> FetchResult<Vec<Product>> {
        (self.f)().await
    }
}
