//! Storage layer errors.
//!
//! These errors never escape the [`StorageAdapter`](crate::StorageAdapter)
//! boundary - the adapter logs them and degrades to defaults. They exist so
//! backend implementations have a typed channel to report what went wrong.

use std::path::{Path, PathBuf};
use thiserror::Error;
use vantage_types::ErrorCode;

/// Storage backend error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (quota exceeded, permission, missing dir).
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized for storage.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// Backend base directory could not be created.
    #[error("failed to create storage directory {path}: {source}")]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl StorageError {
    /// Creates a [`StorageError::DirectoryCreation`].
    pub fn directory_creation(path: &Path, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "STORE_IO",
            Self::Serialize(_) => "STORE_SERIALIZE",
            Self::DirectoryCreation { .. } => "STORE_DIRECTORY_CREATION",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A quota or transient fs error may clear up; a value that does not
        // serialize will not.
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_types::assert_error_codes;

    fn all_variants() -> Vec<StorageError> {
        vec![
            StorageError::Io(std::io::Error::other("x")),
            StorageError::Serialize("x".into()),
            StorageError::directory_creation(Path::new("/x"), std::io::Error::other("x")),
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "STORE_");
    }

    #[test]
    fn io_is_recoverable() {
        assert!(StorageError::Io(std::io::Error::other("x")).is_recoverable());
        assert!(!StorageError::Serialize("x".into()).is_recoverable());
    }
}
