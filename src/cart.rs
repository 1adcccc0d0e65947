//! Shopping cart state container.
//!
//! This module provides [`ShoppingCart`], the main entry point for cart
//! operations. The cart is a [`PersistedCell`] of [`CartState`] plus a
//! transient open/closed flag for the cart panel.

use crate::cell::PersistedCell;
use cartbox_core::{CartState, Result};
use cartbox_storage::StorageMedium;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Storage key carts persist under unless one is chosen explicitly.
pub const CART_STORAGE_KEY: &str = "shopping-cart";

/// A shopping cart whose contents survive restarts.
///
/// Cart contents load from the storage medium once, at
/// [`load`](Self::load); every mutation updates memory and writes the
/// new contents through before returning. Reads never touch the medium.
///
/// The panel flag ([`open`](Self::open) / [`close`](Self::close)) is
/// deliberately not persisted: a fresh session always starts with the
/// panel closed.
///
/// All methods take `&self`; the cart is shared behind an `Arc` and is
/// safe to use from multiple threads.
///
/// # Example
///
/// ```ignore
/// use cartbox::{MemoryStore, ShoppingCart};
/// use std::sync::Arc;
///
/// let cart = ShoppingCart::load(Arc::new(MemoryStore::new()))?;
/// cart.increase_quantity(42)?;
/// cart.increase_quantity(42)?;
/// assert_eq!(cart.item_quantity(42), 2);
/// assert_eq!(cart.total_quantity(), 2);
/// ```
#[derive(Debug)]
pub struct ShoppingCart {
    state: PersistedCell<CartState>,
    panel_open: AtomicBool,
}

impl ShoppingCart {
    /// Load the cart stored under [`CART_STORAGE_KEY`].
    ///
    /// An absent key starts an empty cart and seeds the medium with it.
    /// Stored text that fails to parse is an error; the stored value is
    /// left untouched for inspection rather than overwritten.
    pub fn load(medium: Arc<dyn StorageMedium>) -> Result<Self> {
        Self::load_with_key(medium, CART_STORAGE_KEY)
    }

    /// Load a cart stored under a caller-chosen key.
    ///
    /// Lets several independent carts share one medium.
    pub fn load_with_key(medium: Arc<dyn StorageMedium>, key: impl Into<String>) -> Result<Self> {
        let state = PersistedCell::open_with(medium, key, CartState::new)?;
        debug!(
            "cart ready under {:?} with {} lines",
            state.key(),
            state.read(CartState::len)
        );
        Ok(Self {
            state,
            panel_open: AtomicBool::new(false),
        })
    }

    /// Quantity of `id` in the cart, or 0 when absent.
    pub fn item_quantity(&self, id: u64) -> u32 {
        self.state.read(|state| state.item_quantity(id))
    }

    /// Add one unit of `id`, creating a quantity-1 line when absent.
    pub fn increase_quantity(&self, id: u64) -> Result<()> {
        self.state.update(|state| state.with_increment(id))
    }

    /// Remove one unit of `id`.
    ///
    /// Dropping from quantity 1 removes the line entirely; an absent id
    /// is a no-op (the unchanged contents are still written through).
    pub fn decrease_quantity(&self, id: u64) -> Result<()> {
        self.state.update(|state| state.with_decrement(id))
    }

    /// Remove the line for `id` regardless of its quantity.
    pub fn remove(&self, id: u64) -> Result<()> {
        self.state.update(|state| state.without(id))
    }

    /// Snapshot of the current contents.
    ///
    /// The snapshot is independent of the live cart: later mutations do
    /// not change it.
    pub fn items(&self) -> CartState {
        self.state.get()
    }

    /// Total units across all lines, the number a cart badge shows.
    pub fn total_quantity(&self) -> u32 {
        self.state.read(CartState::total_quantity)
    }

    /// Show the cart panel.
    pub fn open(&self) {
        self.panel_open.store(true, Ordering::SeqCst);
    }

    /// Hide the cart panel.
    pub fn close(&self) {
        self.panel_open.store(false, Ordering::SeqCst);
    }

    /// Whether the cart panel is currently shown.
    pub fn is_open(&self) -> bool {
        self.panel_open.load(Ordering::SeqCst)
    }

    /// The storage key this cart persists under.
    pub fn storage_key(&self) -> &str {
        self.state.key()
    }
}
