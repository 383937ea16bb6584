//! # Cart Store
//!
//! The authoritative mutable collection of (product, quantity) entries.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Store Operations                             │
//! │                                                                         │
//! │  Update Source            Operation                 State Change        │
//! │  ─────────────            ─────────                 ────────────        │
//! │                                                                         │
//! │  UI "add" click ─────────► add_or_increment() ────► qty += n | insert  │
//! │                                                                         │
//! │  RFID add scan ──────────► add_or_increment() ────► qty += 1 | insert  │
//! │                                                                         │
//! │  UI +/- buttons ─────────► adjust_quantity() ─────► qty = max(0,q+δ)   │
//! │                                                     (0 removes entry)  │
//! │  RFID remove scan ───────► adjust_quantity(-1) ───►                    │
//! │                                                                         │
//! │  UI "remove" click ──────► remove() ──────────────► entry dropped      │
//! │                                                                         │
//! │  Totals read ────────────► total_price() etc. ────► recomputed fresh,  │
//! │                                                     never cached       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! After any operation:
//! - every entry has quantity ≥ 1 (a zero-quantity entry is removed, never stored)
//! - entry ids are unique (at most one entry per product id)
//!
//! Both hold because entries are owned exclusively by the cart: the scan
//! channel and the UI request mutations through these operations, they
//! never touch an entry directly.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::product::Product;

// =============================================================================
// Cart Entry
// =============================================================================

/// A product annotated with its in-cart quantity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    /// Frozen product data. Immutable while in the cart.
    pub product: Product,

    /// Quantity in cart. Always ≥ 1 while the entry exists.
    pub quantity: i64,
}

impl CartEntry {
    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Entries are ordered most-recent-first: a newly inserted entry goes to
/// the front of the list, which is what the "you just added X" recommendation
/// logic downstream keys off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { entries: Vec::new() }
    }

    /// Adds a product or increments its quantity if already present.
    ///
    /// ## Behavior
    /// - Existing entry (by product id): quantity += `qty`
    /// - New product: inserted at the FRONT with quantity `qty`
    ///
    /// `qty` is assumed positive; there are no error conditions here.
    pub fn add_or_increment(&mut self, product: Product, qty: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            entry.quantity += qty;
            return;
        }

        self.entries.insert(
            0,
            CartEntry {
                product,
                quantity: qty,
            },
        );
    }

    /// Adjusts an entry's quantity by a signed delta.
    ///
    /// New quantity is `max(0, current + delta)`; reaching 0 removes the
    /// entry entirely - a zero-quantity entry is never retained. An absent
    /// id is a silent no-op, not an error: a stale remove scan or a
    /// double-click on an already-removed row should not fault the cart.
    pub fn adjust_quantity(&mut self, id: &str, delta: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == id) {
            entry.quantity = (entry.quantity + delta).max(0);
        }
        self.entries.retain(|e| e.quantity > 0);
    }

    /// Unconditionally drops the entry with this id, if present.
    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|e| e.product.id != id);
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of quantities across entries. Recomputed on every call.
    pub fn total_item_count(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Sum of quantity × unit price across entries. Recomputed on every
    /// call - totals are never cached, so they can never go stale across
    /// mutations from a source the reader did not see.
    pub fn total_price(&self) -> Money {
        self.entries
            .iter()
            .fold(Money::zero(), |acc, e| acc + e.line_total())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only view of the entries, most-recent-first.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Current quantity for an id (0 if absent). Mainly for tests and logs.
    pub fn quantity_of(&self, id: &str) -> i64 {
        self.entries
            .iter()
            .find(|e| e.product.id == id)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }
}

// =============================================================================
// Cart Totals Summary
// =============================================================================

/// Totals snapshot for status displays and handoff payloads.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub entry_count: usize,
    pub total_item_count: i64,
    pub total_price_paise: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            entry_count: cart.entries().len(),
            total_item_count: cart.total_item_count(),
            total_price_paise: cart.total_price().paise(),
        }
    }
}

// =============================================================================
// Shared Cart
// =============================================================================

/// The single shared cart, injected into every consumer.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Cart>>` because:
/// - `Arc`: the scan channel task, the UI layer and checkout all hold it
/// - `Mutex`: every mutation runs to completion under the lock, so a UI
///   click and a scan event can never interleave mid-operation
///
/// Mutations from distinct sources resolve in lock-acquisition order;
/// no ordering is promised between sources beyond that.
///
/// ## Why Not RwLock?
/// Cart operations are quick and most of them write. An RwLock would add
/// complexity with minimal benefit.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<Cart>>,
}

impl SharedCart {
    /// Creates a new empty shared cart.
    pub fn new() -> Self {
        SharedCart {
            inner: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use smartcart_core::cart::{CartTotals, SharedCart};
    ///
    /// let cart = SharedCart::new();
    /// let totals = cart.with_cart(|c| CartTotals::from(c));
    /// assert_eq!(totals.total_item_count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.inner.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.inner.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
