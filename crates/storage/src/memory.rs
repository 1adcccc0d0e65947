//! In-memory storage medium
//!
//! Backs a cart with a plain process-local map. The default store grows
//! without bound; `with_quota` caps the total stored bytes so tests can
//! exercise the medium-full failure path the way a browser quota would.

use crate::StorageMedium;
use cartbox_core::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local storage medium.
///
/// Values live in a `HashMap` behind an `RwLock`; nothing is persisted
/// across processes. This is the medium ephemeral sessions use, and the
/// natural seam for tests that need to inspect or pre-seed stored text.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once total key + value bytes
    /// would exceed `max_bytes`.
    ///
    /// A rejected write leaves the previously stored value in place.
    pub fn with_quota(max_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(max_bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StorageMedium for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        if let Some(quota) = self.quota {
            // the write replaces any previous value under key, so that
            // value does not count against the projection
            let retained: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let projected = retained + key.len() + value.len();
            if projected > quota {
                return Err(Error::Storage(format!(
                    "quota exceeded: {} > {} bytes",
                    projected, quota
                )));
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
