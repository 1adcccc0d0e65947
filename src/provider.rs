//! Ambient cart provider.
//!
//! A process-wide slot holding the current cart, so code far from
//! session setup can reach it without a handle being threaded through
//! every call path. Sessions install their cart here via
//! [`Session::provide`](crate::Session::provide); consumers call
//! [`current`] (or [`try_current`] when a missing provider is routine).
//!
//! The slot holds at most one cart. Installing a second cart replaces
//! the first, which is how tests and reconfiguration swap carts out.

use crate::cart::ShoppingCart;
use cartbox_core::{Error, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

static CURRENT: Lazy<RwLock<Option<Arc<ShoppingCart>>>> = Lazy::new(|| RwLock::new(None));

/// Install `cart` as the ambient cart, returning the one it replaced.
pub fn install(cart: Arc<ShoppingCart>) -> Option<Arc<ShoppingCart>> {
    debug!("installing ambient cart under {:?}", cart.storage_key());
    CURRENT.write().replace(cart)
}

/// The ambient cart.
///
/// Fails with [`Error::NoProvider`] when no session has installed one.
pub fn current() -> Result<Arc<ShoppingCart>> {
    try_current().ok_or_else(|| Error::NoProvider("shopping cart".to_string()))
}

/// The ambient cart, or `None` when no session has installed one.
pub fn try_current() -> Option<Arc<ShoppingCart>> {
    CURRENT.read().clone()
}

/// Clear the ambient slot, returning the cart that was installed.
pub fn uninstall() -> Option<Arc<ShoppingCart>> {
    CURRENT.write().take()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartbox_storage::MemoryStore;

    // One test owns the whole lifecycle: the slot is process-global, so
    // splitting these assertions across tests would race under the
    // parallel test runner.
    #[test]
    fn install_current_and_uninstall_cycle() {
        assert!(try_current().is_none());
        let err = current().unwrap_err();
        assert!(err.is_no_provider());

        let medium = Arc::new(MemoryStore::new());
        let cart = Arc::new(ShoppingCart::load(medium).unwrap());
        assert!(install(cart.clone()).is_none());

        let ambient = current().unwrap();
        ambient.increase_quantity(3).unwrap();
        assert_eq!(cart.item_quantity(3), 1);

        let replacement_medium = Arc::new(MemoryStore::new());
        let replacement = Arc::new(ShoppingCart::load(replacement_medium).unwrap());
        let displaced = install(replacement).unwrap();
        assert_eq!(displaced.item_quantity(3), 1);

        assert!(uninstall().is_some());
        assert!(try_current().is_none());
        assert!(uninstall().is_none());
    }
}
