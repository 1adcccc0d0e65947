//! Session entry point for cartbox.
//!
//! This module provides the `Session` struct, which wires a storage
//! medium to a [`ShoppingCart`] and optionally publishes the cart
//! through the ambient [`provider`].

use crate::cart::{ShoppingCart, CART_STORAGE_KEY};
use crate::provider;
use cartbox_core::Result;
use cartbox_storage::{FileStore, MemoryStore, StorageMedium};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A cartbox session: one storage medium and the cart loaded from it.
///
/// Create a session with [`Session::open`] for a file-backed medium,
/// [`Session::ephemeral`] for an in-memory one, or [`Session::builder`]
/// for full control.
///
/// # Example
///
/// ```ignore
/// use cartbox::prelude::*;
///
/// // File-backed: contents survive restarts
/// let session = Session::open("./cart.json")?;
/// session.cart.increase_quantity(42)?;
///
/// // In-memory: nothing outlives the session
/// let scratch = Session::ephemeral()?;
/// scratch.cart.increase_quantity(1)?;
/// ```
pub struct Session {
    medium: Arc<dyn StorageMedium>,

    /// The cart loaded from this session's medium.
    pub cart: Arc<ShoppingCart>,
}

impl Session {
    /// Open a file-backed session storing its data at `path`.
    ///
    /// A fresh path gets its file created right away: loading the cart
    /// seeds the empty contents and writes them through. Contents
    /// persist across sessions opened at the same path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Open a session backed by memory only.
    ///
    /// Nothing is written to disk and all contents are lost when the
    /// session is dropped. Useful for tests and scratch work.
    pub fn ephemeral() -> Result<Self> {
        Self::builder().open()
    }

    /// Create a builder for session configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let session = Session::builder()
    ///     .path("./data.json")
    ///     .storage_key("wishlist")
    ///     .open()?;
    /// ```
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Install this session's cart as the ambient cart.
    ///
    /// Returns the cart that was ambient before, if any. Consumers then
    /// reach the cart through [`provider::current`].
    pub fn provide(&self) -> Option<Arc<ShoppingCart>> {
        provider::install(self.cart.clone())
    }

    /// The storage medium backing this session.
    ///
    /// Hands the same medium to additional carts or persisted cells so
    /// they share one durable store.
    pub fn medium(&self) -> Arc<dyn StorageMedium> {
        self.medium.clone()
    }
}

/// Builder for session configuration.
pub struct SessionBuilder {
    path: Option<PathBuf>,
    storage_key: String,
}

impl SessionBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            path: None,
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }

    /// Back the session with a JSON file at `path`.
    ///
    /// Without a path the session is memory-backed.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Persist the cart under a custom key instead of
    /// [`CART_STORAGE_KEY`].
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Open the session.
    pub fn open(self) -> Result<Session> {
        let medium: Arc<dyn StorageMedium> = match self.path {
            Some(path) => {
                debug!("opening file-backed session at {}", path.display());
                Arc::new(FileStore::open(path)?)
            }
            None => {
                debug!("opening ephemeral session");
                Arc::new(MemoryStore::new())
            }
        };
        let cart = Arc::new(ShoppingCart::load_with_key(medium.clone(), self.storage_key)?);
        Ok(Session { medium, cart })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
