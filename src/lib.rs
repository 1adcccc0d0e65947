//! # Cartbox
//!
//! Persistent shopping-cart state container with pluggable storage.
//!
//! Cartbox keeps a cart's contents in memory, mirrors every change to a
//! storage medium as JSON, and restores the contents when the next
//! session opens the same medium.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cartbox::prelude::*;
//!
//! // Open a session backed by a JSON file
//! let session = Session::open("./cart.json")?;
//!
//! // Cart operations
//! session.cart.increase_quantity(42)?;
//! session.cart.increase_quantity(42)?;
//! assert_eq!(session.cart.item_quantity(42), 2);
//!
//! // Publish the cart for ambient lookup
//! session.provide();
//! let cart = provider::current()?;
//! cart.decrease_quantity(42)?;
//! ```
//!
//! ## Persistence Model
//!
//! The medium is read once, when a cart loads: stored contents win over
//! the empty default, an absent key seeds the default, and malformed
//! stored text fails loudly instead of silently resetting the cart.
//! After that, every mutation writes the full contents through before
//! returning; reads are memory-only.
//!
//! ## Building Blocks
//!
//! - [`Session`] - a storage medium plus the cart loaded from it
//! - [`ShoppingCart`] - cart operations over a persisted state cell
//! - [`PersistedCell`] - one typed value mirrored to one storage key
//! - [`StorageMedium`] - the string key-value contract media implement
//! - [`provider`] - process-wide slot for the current cart

#![warn(missing_docs)]

mod cart;
mod cell;
mod session;

pub mod prelude;
pub mod provider;

// Re-export main entry points
pub use cart::{ShoppingCart, CART_STORAGE_KEY};
pub use cell::PersistedCell;
pub use session::{Session, SessionBuilder};

// Re-export the shared model and error types
pub use cartbox_core::{CartItem, CartState, Error, Result};

// Re-export storage media
pub use cartbox_storage::{FileStore, MemoryStore, StorageMedium};
