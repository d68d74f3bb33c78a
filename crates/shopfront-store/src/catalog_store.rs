//! # Catalog Store
//!
//! Owns the product list and the fetch lifecycle around it.
//!
//! ## Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Refresh                                    │
//! │                                                                         │
//! │  CatalogStore::start ──► begin_refresh ──► spawn(fetch)   (once)       │
//! │                                                                         │
//! │  refresh_products()                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  begin_refresh        isLoading = true, error = None                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fetcher.fetch_products().await                                        │
//! │       │                                                                 │
//! │       ├── Ok(products) ──► finish_success  products replaced           │
//! │       │                                                                 │
//! │       └── Err(e)       ──► finish_failure  error = e.to_string()       │
//! │                                            products kept               │
//! │                                                                         │
//! │  Refreshes are neither coalesced nor cancelled. When two overlap, the  │
//! │  one that finishes last decides the state.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};

use shopfront_core::{CatalogPhase, CatalogState, Product};

use crate::fetch::CatalogFetcher;

/// Product list plus fetch status, observable through a watch channel.
pub struct CatalogStore {
    state: watch::Sender<CatalogState>,
    fetcher: Arc<dyn CatalogFetcher>,
}

impl CatalogStore {
    /// Creates the store and starts the initial fetch.
    ///
    /// The store is `Loading` when this returns. Must be called inside a
    /// Tokio runtime.
    pub fn start(fetcher: Arc<dyn CatalogFetcher>) -> Arc<Self> {
        let (state, _) = watch::channel(CatalogState::new());
        let store = Arc::new(CatalogStore { state, fetcher });

        store.state.send_modify(CatalogState::begin_refresh);

        let initial = Arc::clone(&store);
        tokio::spawn(async move {
            initial.run_fetch().await;
        });

        store
    }

    /// Fetches the catalog again.
    ///
    /// Failures land in [`CatalogStore::error`]; the previous products stay.
    ///
    /// ## Returns
    /// The phase this refresh left the store in.
    pub async fn refresh_products(&self) -> CatalogPhase {
        self.state.send_modify(CatalogState::begin_refresh);
        self.run_fetch().await
    }

    async fn run_fetch(&self) -> CatalogPhase {
        let started = Instant::now();
        let result = self.fetcher.fetch_products().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(products) => {
                let count = products.len();
                self.state
                    .send_modify(|state| state.finish_success(products, Utc::now()));
                info!(count, elapsed_ms, "Catalog refreshed");
                CatalogPhase::Success
            }
            Err(e) => {
                warn!(error = %e, elapsed_ms, "Catalog refresh failed");
                self.state
                    .send_modify(|state| state.finish_failure(e.to_string()));
                CatalogPhase::Error
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current products.
    pub fn products(&self) -> Vec<Product> {
        self.state.borrow().products.clone()
    }

    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Message from the last failed fetch, cleared when the next one starts.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> CatalogPhase {
        self.state.borrow().phase()
    }

    /// A copy of the whole state.
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Looks up a product by id.
    pub fn find_product(&self, product_id: &str) -> Option<Product> {
        self.state.borrow().find_product(product_id).cloned()
    }

    /// Receives the state after every transition.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// Waits until no fetch is in flight and returns the state.
    pub async fn wait_until_settled(&self) -> CatalogState {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading).await {
            Ok(state) => CatalogState::clone(&state),
            Err(_) => self.snapshot(),
        };
        settled
    }
}
