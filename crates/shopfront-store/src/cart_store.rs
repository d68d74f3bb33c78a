//! # Cart Store
//!
//! The authoritative in-memory cart, kept in sync with one persisted blob.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Mutation Flow                                 │
//! │                                                                         │
//! │  add_to_cart / remove_from_cart / clear_cart                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐   synchronous, atomic   │
//! │  │ watch::Sender::send_if_modified           │                         │
//! │  │   1. apply change to Cart                 │                         │
//! │  │   2. serialize the whole cart (JSON)      │                         │
//! │  │   3. notify subscribers if changed        │                         │
//! │  └───────────────────┬───────────────────────┘                         │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  tokio::spawn(storage.set(key, blob))  ──►  PendingPersist             │
//! │                                             │                           │
//! │                                             ├── .wait().await → result │
//! │                                             └── drop → write continues │
//! │                                                                         │
//! │  Write failures are logged. Memory stays authoritative.                │
//! │  Writes may land out of order: last write to finish wins.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Hydration
//! ```text
//! storage.get(key)
//!   ├── Err            → ReadFailed  (cart stays empty)
//!   ├── None           → Empty
//!   ├── bad JSON/shape → Discarded   (cart stays empty)
//!   └── valid          → Restored    (cart replaced)
//!                        Superseded  (cart already mutated, memory kept)
//! ```
//!
//! Every mutation must happen inside a Tokio runtime, since the persist is a
//! spawned task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use shopfront_core::{
    Cart, CartLineItem, CartSummary, Product, ProductVariant, DEFAULT_CART_STORAGE_KEY,
};

use crate::error::StoreResult;
use crate::persistence::KeyValueStore;

// =============================================================================
// Hydrate Outcome
// =============================================================================

/// What [`CartStore::hydrate`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrateOutcome {
    /// A valid cart was loaded.
    Restored { items: usize },

    /// Nothing stored under the key.
    Empty,

    /// A blob was found but could not be decoded; the cart stays empty.
    Discarded { reason: String },

    /// The adapter failed; the cart stays empty.
    ReadFailed { reason: String },

    /// The cart was mutated before hydration completed; memory was kept.
    Superseded,

    /// `hydrate` had already run on this store.
    AlreadyHydrated,
}

// =============================================================================
// Pending Persist
// =============================================================================

/// Handle to a spawned cart write.
///
/// Dropping it does not cancel the write.
#[derive(Debug)]
pub struct PendingPersist {
    handle: JoinHandle<StoreResult<()>>,
}

impl PendingPersist {
    /// Waits for the write to finish.
    pub async fn wait(self) -> StoreResult<()> {
        self.handle.await?
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Cart state plus its persistence.
pub struct CartStore {
    state: watch::Sender<Cart>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    hydrated: AtomicBool,
    /// Set by every mutation; lets hydrate notice it lost a race.
    mutated: AtomicBool,
}

impl CartStore {
    /// Creates an empty store persisting under [`DEFAULT_CART_STORAGE_KEY`].
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, DEFAULT_CART_STORAGE_KEY)
    }

    /// Creates an empty store persisting under `key`.
    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(Cart::new());
        CartStore {
            state,
            storage,
            key: key.into(),
            hydrated: AtomicBool::new(false),
            mutated: AtomicBool::new(false),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Loads the persisted cart. Runs at most once per store.
    ///
    /// Never fails: every problem is logged and leaves the cart empty. If the
    /// cart was mutated before hydration completes, the in-memory cart wins.
    pub async fn hydrate(&self) -> HydrateOutcome {
        if self.hydrated.swap(true, Ordering::SeqCst) {
            return HydrateOutcome::AlreadyHydrated;
        }

        let bytes = match self.storage.get(&self.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart");
                return HydrateOutcome::Empty;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted cart");
                return HydrateOutcome::ReadFailed {
                    reason: e.to_string(),
                };
            }
        };

        let cart = match decode_cart(&bytes) {
            Ok(cart) => cart,
            Err(reason) => {
                warn!(key = %self.key, %reason, "Discarding malformed persisted cart");
                return HydrateOutcome::Discarded { reason };
            }
        };

        let items = cart.item_count();
        let restored = self.state.send_if_modified(|current| {
            if self.mutated.load(Ordering::SeqCst) {
                return false;
            }
            *current = cart;
            true
        });

        if restored {
            info!(key = %self.key, items, "Cart restored");
            HydrateOutcome::Restored { items }
        } else {
            warn!(key = %self.key, "Cart changed during hydration, keeping in-memory cart");
            HydrateOutcome::Superseded
        }
    }

    /// True once `hydrate` has been called.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `variant`.
    ///
    /// Merges into an existing line with the same (product, variant) key or
    /// appends a new line. No stock or membership check; see
    /// [`shopfront_core::validation::ensure_purchasable`].
    pub fn add_to_cart(&self, product: &Product, variant: &ProductVariant) -> PendingPersist {
        let mut quantity = 0;
        let persist = self.mutate(|cart| {
            quantity = cart.add_item(product, variant);
            true
        });

        debug!(
            product_id = %product.id,
            variant_id = %variant.id,
            quantity,
            "Added to cart"
        );
        persist
    }

    /// Removes the line with the given key. A missing key is a no-op that
    /// still re-persists but does not notify subscribers.
    pub fn remove_from_cart(&self, product_id: &str, variant_id: &str) -> PendingPersist {
        let mut removed = false;
        let persist = self.mutate(|cart| {
            removed = cart.remove_item(product_id, variant_id);
            removed
        });

        debug!(product_id, variant_id, removed, "Remove from cart");
        persist
    }

    /// Empties the cart.
    pub fn clear_cart(&self) -> PendingPersist {
        let persist = self.mutate(|cart| {
            let had_items = !cart.is_empty();
            cart.clear();
            had_items
        });

        debug!("Cart cleared");
        persist
    }

    /// Applies `change` and serializes the result in one step, then spawns
    /// the write. `change` returns whether subscribers should be notified.
    fn mutate<F>(&self, change: F) -> PendingPersist
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        let mut blob = None;
        self.state.send_if_modified(|cart| {
            self.mutated.store(true, Ordering::SeqCst);
            let changed = change(cart);
            blob = Some(serde_json::to_vec(cart));
            changed
        });

        let storage = Arc::clone(&self.storage);
        let key = self.key.clone();

        let handle = tokio::spawn(async move {
            let result = match blob {
                Some(Ok(bytes)) => {
                    let len = bytes.len();
                    storage.set(&key, bytes).await.map(|()| len)
                }
                Some(Err(e)) => Err(e.into()),
                None => Ok(0),
            };

            match result {
                Ok(len) => {
                    debug!(key = %key, len, "Cart persisted");
                    Ok(())
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to persist cart");
                    Err(e)
                }
            }
        });

        PendingPersist { handle }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The cart total with two fraction digits, e.g. `"30.55"`.
    ///
    /// Lines with an unparsable price, or whose addition would overflow the
    /// sum, are left out and logged.
    pub fn get_total_price(&self) -> String {
        let cart = self.state.borrow();
        for (product_id, variant_id) in cart.excluded_lines() {
            warn!(product_id, variant_id, "Cart line excluded from total");
        }
        cart.total_price()
    }

    /// Line items in cart order.
    pub fn cart_items(&self) -> Vec<CartLineItem> {
        self.state.borrow().items().to_vec()
    }

    /// A copy of the whole cart.
    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Line count, quantity and total in one read.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&*self.state.borrow())
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.state.borrow().item_count()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.state.borrow().total_quantity()
    }

    /// Receives the cart after every change.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }
}

fn decode_cart(bytes: &[u8]) -> Result<Cart, String> {
    let items: Vec<CartLineItem> = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    Cart::from_items(items).map_err(|e| e.to_string())
}
