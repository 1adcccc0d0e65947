//! Persisted value cell.
//!
//! This module provides [`PersistedCell`], the building block the cart
//! is made of: a typed value held in memory and mirrored to a storage
//! medium as JSON under a fixed key.

use cartbox_core::Result;
use cartbox_storage::StorageMedium;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A typed value mirrored to one key of a storage medium.
///
/// The cell owns the authoritative copy in memory. The medium is read
/// exactly once, at construction: a stored value is adopted, an absent
/// key seeds the default (written through immediately), and malformed
/// stored text fails construction rather than silently resetting state.
///
/// Every `set`/`update` serializes the new value and writes it through
/// to the medium before returning. When the medium rejects the write,
/// the in-memory value has already changed; callers that need strict
/// agreement between memory and medium must treat the error as fatal.
///
/// # Example
///
/// ```ignore
/// use cartbox::{MemoryStore, PersistedCell};
/// use std::sync::Arc;
///
/// let medium = Arc::new(MemoryStore::new());
/// let counter: PersistedCell<u32> = PersistedCell::open(medium, "visits", 0)?;
/// counter.update(|n| n + 1)?;
/// assert_eq!(counter.get(), 1);
/// ```
pub struct PersistedCell<T> {
    key: String,
    medium: Arc<dyn StorageMedium>,
    value: RwLock<T>,
}

impl<T> PersistedCell<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the cell under `key`, seeding `default` when the key is absent.
    pub fn open(
        medium: Arc<dyn StorageMedium>,
        key: impl Into<String>,
        default: T,
    ) -> Result<Self> {
        Self::open_with(medium, key, || default)
    }

    /// Open the cell under `key`, computing the seed value only when the
    /// key is absent.
    ///
    /// `init` runs at most once. The seed is written through right away
    /// so the medium and memory agree from the start.
    pub fn open_with<F>(
        medium: Arc<dyn StorageMedium>,
        key: impl Into<String>,
        init: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> T,
    {
        let key = key.into();
        let value = match medium.get_item(&key)? {
            Some(text) => {
                let value = serde_json::from_str(&text)?;
                debug!("loaded persisted value under {:?}", key);
                value
            }
            None => {
                let value = init();
                write_through(medium.as_ref(), &key, &value)?;
                debug!("seeded default under {:?}", key);
                value
            }
        };
        Ok(Self {
            key,
            medium,
            value: RwLock::new(value),
        })
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// Cheaper than [`get`](Self::get) when a clone is not needed.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    /// Replace the value and write it through to the medium.
    pub fn set(&self, next: T) -> Result<()> {
        let mut guard = self.value.write();
        *guard = next;
        write_through(self.medium.as_ref(), &self.key, &*guard)
    }

    /// Derive a new value from the current one and write it through.
    ///
    /// The write lock is held across `f`, so concurrent updates cannot
    /// interleave between read and replace.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&T) -> T,
    {
        let mut guard = self.value.write();
        let next = f(&guard);
        *guard = next;
        write_through(self.medium.as_ref(), &self.key, &*guard)
    }

    /// The storage key this cell writes under.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T> PersistedCell<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Clone the current value out of the cell.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

// Manual impl: `medium` is a trait object with no `Debug` bound, so the
// derive is unavailable; the key and value are shown, the medium elided.
impl<T: fmt::Debug> fmt::Debug for PersistedCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedCell")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

// One serialize + one set_item per mutation, never more.
fn write_through<T: Serialize>(medium: &dyn StorageMedium, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value)?;
    medium.set_item(key, &text)?;
    trace!("wrote {} bytes through under {:?}", text.len(), key);
    Ok(())
}
