//! File-based storage backend.
//!
//! Records are stored one file per key in a base directory:
//!
//! ```text
//! ~/.vantage/storage/
//! ├── vantage.auth_token
//! ├── vantage.auth_user
//! ├── vantage.theme
//! └── ...
//! ```
//!
//! Writes are atomic (write to a dot-prefixed temp file, then rename).

use crate::{StorageBackend, StorageError};
use std::fs;
use std::path::{Path, PathBuf};

/// Durable file-per-key backend.
///
/// # Example
///
/// ```no_run
/// use vantage_store::{FileBackend, StorageBackend};
/// use std::path::PathBuf;
///
/// let backend = FileBackend::new(PathBuf::from("~/.vantage/storage"))?;
/// backend.write("vantage.theme", "\"dark\"")?;
/// # Ok::<(), vantage_store::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    /// Base directory for record files.
    base_path: PathBuf,
}

impl FileBackend {
    /// Creates a new file backend.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DirectoryCreation`] if the directory cannot
    /// be created.
    pub fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        let expanded = expand_tilde(&base_path);

        if !expanded.exists() {
            fs::create_dir_all(&expanded)
                .map_err(|e| StorageError::directory_creation(&expanded, e))?;
        }

        Ok(Self {
            base_path: expanded,
        })
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{key}.tmp"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key);
        let temp_path = self.temp_path(key);

        // Write to temp file first (atomic write pattern)
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            // Skip temp files
            if name.starts_with('.') {
                continue;
            }
            keys.push(name);
        }

        Ok(keys)
    }
}

/// Expands `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(rest) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
    }
    path.to_path_buf()
}

/// Returns the default storage path.
#[must_use]
pub fn default_storage_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vantage")
        .join("storage")
}
