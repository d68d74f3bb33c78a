//! # Cart
//!
//! The in-memory cart: an ordered list of line items keyed by
//! `(product.id, variant.id)`.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                 Key present?     Effect                      │
//! │  ─────────                 ────────────     ──────                      │
//! │                                                                         │
//! │  add_item(p, v) ─────────► yes ───────────► items[i].quantity += 1      │
//! │                  └───────► no  ───────────► items.push(qty = 1)         │
//! │                                                                         │
//! │  remove_item(pid, vid) ──► yes ───────────► items.remove(i)             │
//! │                  └───────► no  ───────────► (nothing)                   │
//! │                                                                         │
//! │  clear() ────────────────────────────────► items.clear()                │
//! │                                                                         │
//! │  NOTE: insertion order is preserved; merging mutates in place.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//! A line item stores full copies of the product and variant as they were
//! when added. Later catalog refreshes never rewrite cart lines, so the
//! price a line was added at is the price it totals at.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Amount;
use crate::types::{Product, ProductVariant};

// =============================================================================
// Line Item
// =============================================================================

/// One (product, variant, quantity) entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    /// Product snapshot at time of adding.
    pub product: Product,

    /// Variant snapshot at time of adding.
    pub variant: ProductVariant,

    /// Always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Creates a line with quantity 1.
    pub fn new(product: Product, variant: ProductVariant) -> Self {
        CartLineItem {
            product,
            variant,
            quantity: 1,
        }
    }

    /// Checks the composite key.
    #[inline]
    pub fn matches(&self, product_id: &str, variant_id: &str) -> bool {
        self.product.id == product_id && self.variant.id == variant_id
    }

    /// Unit price × quantity, exact.
    pub fn line_total(&self) -> CoreResult<Amount> {
        self.variant
            .price
            .amount()?
            .checked_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Line items are unique by `(product.id, variant.id)`
/// - Every quantity is ≥ 1
///
/// Serializes as a bare JSON array of line items. Decoding goes through
/// [`Cart::from_items`] so the invariants are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from decoded line items, enforcing the invariants.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if any quantity is 0
    /// - `DuplicateLineItem` if two lines share a key
    pub fn from_items(items: Vec<CartLineItem>) -> CoreResult<Self> {
        for (i, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CoreError::InvalidQuantity {
                    product_id: item.product.id.clone(),
                    variant_id: item.variant.id.clone(),
                    quantity: item.quantity,
                });
            }

            if items[..i]
                .iter()
                .any(|earlier| earlier.matches(&item.product.id, &item.variant.id))
            {
                return Err(CoreError::DuplicateLineItem {
                    product_id: item.product.id.clone(),
                    variant_id: item.variant.id.clone(),
                });
            }
        }

        Ok(Cart { items })
    }

    /// Adds one unit of a variant.
    ///
    /// ## Behavior
    /// - Key already in cart: quantity increases by 1, position unchanged
    /// - Key not in cart: new line with quantity 1 appended at the end
    ///
    /// Neither stock nor product/variant membership is checked here; see
    /// [`crate::validation::ensure_purchasable`].
    ///
    /// ## Returns
    /// The line's quantity after the add.
    pub fn add_item(&mut self, product: &Product, variant: &ProductVariant) -> u32 {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.matches(&product.id, &variant.id))
        {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items
            .push(CartLineItem::new(product.clone(), variant.clone()));
        1
    }

    /// Removes the line with the given key.
    ///
    /// ## Returns
    /// `true` if a line was removed, `false` if the key was not in the cart.
    pub fn remove_item(&mut self, product_id: &str, variant_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| !i.matches(product_id, variant_id));
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up a line by key.
    pub fn get_item(&self, product_id: &str, variant_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.matches(product_id, variant_id))
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact sum of all line totals.
    ///
    /// Fails on the first line whose amount does not parse.
    pub fn subtotal(&self) -> CoreResult<Amount> {
        self.items
            .iter()
            .try_fold(Amount::zero(), |acc, item| acc.checked_add(item.line_total()?))
    }

    /// The cart total as shown to the user: two fraction digits, rounded
    /// half away from zero once, at the end.
    ///
    /// Lines whose amount cannot be parsed, or whose addition would overflow
    /// the running sum, contribute nothing; [`Cart::excluded_lines`] names
    /// them. Currency codes are ignored.
    ///
    /// ```rust
    /// use shopfront_core::Cart;
    ///
    /// assert_eq!(Cart::new().total_price(), "0.00");
    /// ```
    pub fn total_price(&self) -> String {
        self.lenient_total().0.to_fixed(2)
    }

    /// Keys of lines left out of [`Cart::total_price`].
    pub fn excluded_lines(&self) -> Vec<(&str, &str)> {
        self.lenient_total().1
    }

    /// Sums every line that can be summed and collects the keys of the rest.
    fn lenient_total(&self) -> (Amount, Vec<(&str, &str)>) {
        let mut total = Amount::zero();
        let mut excluded = Vec::new();

        for item in &self.items {
            match item.line_total().and_then(|line| total.checked_add(line)) {
                Ok(sum) => total = sum,
                Err(_) => excluded.push((item.product.id.as_str(), item.variant.id.as_str())),
            }
        }

        (total, excluded)
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Cart totals for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub item_count: u32,
    pub total_quantity: u32,
    pub total_price: String,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            item_count: u32::try_from(cart.item_count()).unwrap_or(u32::MAX),
            total_quantity: u32::try_from(cart.total_quantity()).unwrap_or(u32::MAX),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::fixtures::{product, variant};

    #[test]
    fn test_empty_cart_total() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), "0.00");
        assert_eq!(cart.subtotal().unwrap().to_fixed(2), "0.00");
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = Cart::new();
        let v = variant("v1", "10.00");
        let p = product("p1", vec![v.clone()]);

        for expected in 1..=7 {
            assert_eq!(cart.add_item(&p, &v), expected);
        }

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 7);
        assert_eq!(cart.total_quantity(), 7);
        assert_eq!(cart.total_price(), "70.00");
    }

    #[test]
    fn test_add_remove_scenario() {
        let mut cart = Cart::new();
        let a = variant("a", "10.00");
        let b = variant("b", "10.55");
        let p = product("p1", vec![a.clone(), b.clone()]);

        cart.add_item(&p, &a);
        assert_eq!((cart.total_price().as_str(), cart.item_count()), ("10.00", 1));

        cart.add_item(&p, &a);
        assert_eq!((cart.total_price().as_str(), cart.item_count()), ("20.00", 1));

        cart.add_item(&p, &b);
        assert_eq!((cart.total_price().as_str(), cart.item_count()), ("30.55", 2));

        assert!(cart.remove_item("p1", "a"));
        assert_eq!((cart.total_price().as_str(), cart.item_count()), ("10.55", 1));
    }

    #[test]
    fn test_same_variant_id_in_different_products_is_distinct() {
        let mut cart = Cart::new();
        let v = variant("default", "5.00");
        let p1 = product("p1", vec![v.clone()]);
        let p2 = product("p2", vec![v.clone()]);

        cart.add_item(&p1, &v);
        cart.add_item(&p2, &v);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_insertion_order_preserved_on_merge() {
        let mut cart = Cart::new();
        let a = variant("a", "1.00");
        let b = variant("b", "2.00");
        let p = product("p1", vec![a.clone(), b.clone()]);

        cart.add_item(&p, &a);
        cart.add_item(&p, &b);
        cart.add_item(&p, &a);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.variant.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        let v = variant("v1", "10.00");
        let p = product("p1", vec![v.clone()]);
        cart.add_item(&p, &v);

        let before = cart.clone();
        assert!(!cart.remove_item("p1", "nope"));
        assert!(!cart.remove_item("nope", "v1"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        let v = variant("v1", "10.00");
        let p = product("p1", vec![v.clone()]);
        cart.add_item(&p, &v);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), "0.00");
    }

    #[test]
    fn test_mixed_currency_sums_raw_amounts() {
        let mut cart = Cart::new();
        let usd = variant("usd", "10.00");
        let mut eur = variant("eur", "5.00");
        eur.price = Money::new("5.00", "EUR");
        let p = product("p1", vec![usd.clone(), eur.clone()]);

        cart.add_item(&p, &usd);
        cart.add_item(&p, &eur);
        assert_eq!(cart.total_price(), "15.00");
    }

    #[test]
    fn test_rounding_applies_to_final_total_only() {
        let mut cart = Cart::new();
        let v = variant("v1", "0.335");
        let p = product("p1", vec![v.clone()]);
        cart.add_item(&p, &v);
        cart.add_item(&p, &v);
        cart.add_item(&p, &v);
        // 3 × 0.335 = 1.005 → 1.01 (rounding the unit price first gives 1.02)
        assert_eq!(cart.total_price(), "1.01");
    }

    #[test]
    fn test_unparsable_price_is_skipped_in_total() {
        let mut cart = Cart::new();
        let good = variant("good", "4.50");
        let bad = variant("bad", "free");
        let p = product("p1", vec![good.clone(), bad.clone()]);

        cart.add_item(&p, &good);
        cart.add_item(&p, &bad);

        assert!(cart.subtotal().is_err());
        assert_eq!(cart.total_price(), "4.50");
        assert_eq!(cart.excluded_lines(), vec![("p1", "bad")]);
    }

    #[test]
    fn test_overflowing_line_is_excluded_not_silently_dropped() {
        let mut cart = Cart::new();
        let huge = "100000000000000000000000000000000000000";
        let first = variant("v1", huge);
        let second = variant("v2", huge);
        let cheap = variant("v3", "2.50");
        let p = product("p1", vec![first.clone(), second.clone(), cheap.clone()]);

        cart.add_item(&p, &first);
        cart.add_item(&p, &second);
        cart.add_item(&p, &cheap);

        assert!(matches!(cart.subtotal(), Err(CoreError::AmountOverflow)));
        assert_eq!(
            cart.total_price(),
            "100000000000000000000000000000000000002.50"
        );
        assert_eq!(cart.excluded_lines(), vec![("p1", "v2")]);
    }

    #[test]
    fn test_fully_priced_cart_excludes_nothing() {
        let mut cart = Cart::new();
        let v = variant("v1", "3.00");
        let p = product("p1", vec![v.clone()]);
        cart.add_item(&p, &v);

        assert!(cart.excluded_lines().is_empty());
    }

    #[test]
    fn test_from_items_rejects_zero_quantity() {
        let v = variant("v1", "1.00");
        let mut line = CartLineItem::new(product("p1", vec![v.clone()]), v);
        line.quantity = 0;
        assert!(matches!(
            Cart::from_items(vec![line]),
            Err(CoreError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_from_items_rejects_duplicate_keys() {
        let v = variant("v1", "1.00");
        let line = CartLineItem::new(product("p1", vec![v.clone()]), v);
        assert!(matches!(
            Cart::from_items(vec![line.clone(), line]),
            Err(CoreError::DuplicateLineItem { .. })
        ));
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let mut cart = Cart::new();
        let v = variant("v1", "10.00");
        let p = product("p1", vec![v.clone()]);
        cart.add_item(&p, &v);

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["quantity"], 1);
        assert_eq!(json[0]["variant"]["price"]["currencyCode"], "USD");

        let back: Vec<CartLineItem> = serde_json::from_value(json).unwrap();
        assert_eq!(Cart::from_items(back).unwrap(), cart);
    }

    #[test]
    fn test_summary() {
        let mut cart = Cart::new();
        let v = variant("v1", "2.50");
        let p = product("p1", vec![v.clone()]);
        cart.add_item(&p, &v);
        cart.add_item(&p, &v);

        let summary = CartSummary::from(&cart);
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.total_quantity, 2);
        assert_eq!(summary.total_price, "5.00");
    }
}
