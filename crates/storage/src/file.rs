//! File-backed storage medium
//!
//! Persists all keys as one JSON object (`{"key": "value", ...}`) in a
//! single file. Reads are served from an in-memory cache loaded once at
//! open; every write rewrites the file through a temp-and-rename so a
//! crash mid-write never leaves a torn file behind.
//!
//! The whole-file rewrite is deliberate: media hold a handful of small
//! string values, not a dataset.

use crate::StorageMedium;
use cartbox_core::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Storage medium persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open a file-backed store at `path`.
    ///
    /// A missing file starts the store empty; the file is created on the
    /// first write. A file that exists but does not parse as a JSON
    /// object of strings fails with a serialization error rather than
    /// being silently discarded. The parent directory must already
    /// exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => {
                let entries: HashMap<String, String> = serde_json::from_str(&text)?;
                debug!("loaded {} keys from {}", entries.len(), path.display());
                entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no store file at {}, starting empty", path.display());
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // Caller holds the write lock, so file rewrites are serialized.
    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let text = serde_json::to_string(entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, text.as_bytes())?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageMedium for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)?;
        trace!("wrote {} bytes under {:?}", value.len(), key);
        Ok(())
    }
}
