//! Storage media for cartbox
//!
//! This crate implements the durable side of the persisted cart:
//! - StorageMedium: the string key-value contract persisted cells write through
//! - MemoryStore: process-local medium, optionally quota-limited
//! - FileStore: JSON-file-backed medium with atomic write-through

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use cartbox_core::Result;

/// String key-value contract implemented by every storage medium.
///
/// The shape is deliberately narrow: opaque string values under string
/// keys, read one at a time, written one at a time. Media are shared
/// behind `Arc<dyn StorageMedium>` and must be safe to call from any
/// thread.
///
/// Absence is data, not an error: `get_item` on an unknown key returns
/// `Ok(None)`. Errors are reserved for media that genuinely fail, such
/// as a full quota or an unwritable file.
pub trait StorageMedium: Send + Sync {
    /// Read the value stored under `key`, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}
