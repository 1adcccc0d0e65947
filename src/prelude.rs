//! Convenient imports for cartbox.
//!
//! This module re-exports the most commonly used types so you can get
//! started with a single import:
//!
//! ```ignore
//! use cartbox::prelude::*;
//!
//! let session = Session::ephemeral()?;
//! session.cart.increase_quantity(1)?;
//! ```

// Main entry points
pub use crate::cart::{ShoppingCart, CART_STORAGE_KEY};
pub use crate::cell::PersistedCell;
pub use crate::session::{Session, SessionBuilder};

// Ambient lookup
pub use crate::provider;

// Error handling
pub use cartbox_core::{Error, Result};

// Cart model
pub use cartbox_core::{CartItem, CartState};

// Storage media
pub use cartbox_storage::{FileStore, MemoryStore, StorageMedium};

// Re-export serde_json for convenience
pub use serde_json::json;
