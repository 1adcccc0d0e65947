//! Unified error types for cartbox.
//!
//! This module provides the canonical error type shared by every crate
//! in the workspace and re-exported at the facade root.

use thiserror::Error;

/// All cartbox errors.
///
/// This is the canonical error type for all cart and storage operations.
/// It presents a small, stable surface: callers match on the category,
/// the payload carries the human-readable detail.
#[derive(Debug, Error)]
pub enum Error {
    /// Persisted text could not be parsed, or a value could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The storage medium rejected a read or write (quota, permissions, ...)
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error from a file-backed medium
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ambient lookup was attempted with no provider installed
    #[error("no provider installed: {0}")]
    NoProvider(String),
}

/// Result type for cartbox operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from encoding or decoding persisted text.
    ///
    /// Raised when stored data is malformed, not merely absent. Absent
    /// data is handled by seeding the default and is never an error.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }

    /// Check if this error came from the storage medium itself.
    ///
    /// Covers both medium-level rejections (quota) and I/O failures from
    /// file-backed media. In-memory state is still updated when a
    /// write-through fails with one of these.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_))
    }

    /// Check if this is a missing-provider error.
    pub fn is_no_provider(&self) -> bool {
        matches!(self, Error::NoProvider(_))
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_json_errors_map_to_serialization() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(err.is_serialization());
        assert!(!err.is_storage());
    }

    #[test]
    fn io_errors_count_as_storage() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(err.is_storage());
        assert!(!err.is_serialization());
    }

    #[test]
    fn display_includes_category_and_detail() {
        let err = Error::Storage("quota exceeded".to_string());
        assert_eq!(err.to_string(), "storage error: quota exceeded");

        let err = Error::NoProvider("shopping cart".to_string());
        assert!(err.to_string().contains("no provider"));
    }
}
