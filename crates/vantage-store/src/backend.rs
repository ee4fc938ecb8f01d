//! Storage backend port and the in-memory implementation.

use crate::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Raw, un-namespaced string record storage.
///
/// This is the injected port behind [`StorageAdapter`](crate::StorageAdapter).
/// Implementations store opaque strings under opaque keys; namespacing and
/// (de)serialization live in the adapter.
///
/// Implementations must be thread-safe (`Send + Sync`); the adapter is
/// shared across the runtime behind an `Arc`.
pub trait StorageBackend: Send + Sync {
    /// Reads a record. `Ok(None)` means the key does not exist.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a record, overwriting any existing value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes a record. Returns `true` if it existed.
    fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Lists every key in the backend, namespaced or not.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// In-memory backend.
///
/// Used under test and wherever durable storage is unavailable. Contents
/// die with the process.
///
/// # Example
///
/// ```
/// use vantage_store::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::new();
/// backend.write("k", "v").unwrap();
/// assert_eq!(backend.read("k").unwrap().as_deref(), Some("v"));
/// ```
#[derive(Default)]
pub struct MemoryBackend {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-seeded with records.
    ///
    /// Useful for tests that need legacy (unprefixed) keys in place.
    #[must_use]
    pub fn with_records<I, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: Mutex::new(
                records
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.records.lock().remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.records.lock().keys().cloned().collect())
    }
}
