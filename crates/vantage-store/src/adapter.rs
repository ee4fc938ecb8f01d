//! StorageAdapter - namespaced, typed, failure-degrading storage facade.

use crate::{StorageBackend, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use vantage_types::keys;

/// The fixed namespace prefix shared by every consumer of the runtime.
///
/// Keeps the console's records from colliding with unrelated keys when
/// several independently deployed front-ends share one storage origin.
pub const NAMESPACE: &str = "vantage.";

/// Namespaced key/value persistence facade.
///
/// All keys are transparently prefixed with [`NAMESPACE`]; callers never
/// see the prefix. `set` serializes values as JSON; `get` deserializes with
/// a transparent raw-string fallback for non-JSON content (legacy records).
/// Every operation is exception-safe: backend failures are caught, logged,
/// and surfaced as a boolean failure or the caller's default - never as an
/// error.
///
/// # Example
///
/// ```
/// use vantage_store::{MemoryBackend, StorageAdapter};
///
/// let store = StorageAdapter::new(Box::new(MemoryBackend::new()));
///
/// store.set("theme", &"dark");
/// assert_eq!(store.get("theme", String::from("light")), "dark");
///
/// store.remove("theme");
/// assert_eq!(store.get("theme", String::from("light")), "light");
/// ```
pub struct StorageAdapter {
    backend: Box<dyn StorageBackend>,
}

impl StorageAdapter {
    /// Creates an adapter over the given backend.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn prefixed(key: &str) -> String {
        format!("{NAMESPACE}{key}")
    }

    /// Reads a typed value, returning `default` when the key is absent, the
    /// stored content does not match `T`, or the backend fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get_value(key) {
            Some(value) => match serde_json::from_value(value) {
                Ok(typed) => typed,
                Err(err) => {
                    debug!(key, %err, "stored value does not match requested type");
                    default
                }
            },
            None => default,
        }
    }

    /// Reads the raw JSON value for a key.
    ///
    /// Non-JSON content (legacy raw strings) is wrapped as a JSON string
    /// transparently - never surfaced as an error.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<Value> {
        let raw = match self.backend.read(&Self::prefixed(key)) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key, %err, "storage read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(_) => Some(Value::String(raw)),
        }
    }

    /// Writes a value, serializing it as JSON.
    ///
    /// Returns `false` (after logging) on serialization or backend failure.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(err) => {
                warn!(key, %err, "storage value failed to serialize");
                return false;
            }
        };

        match self.backend.write(&Self::prefixed(key), &serialized) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, %err, "storage write failed");
                false
            }
        }
    }

    /// Removes a key. Returns `false` if it was absent or the backend failed.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.delete(&Self::prefixed(key)) {
            Ok(existed) => existed,
            Err(err) => {
                warn!(key, %err, "storage delete failed");
                false
            }
        }
    }

    /// Returns `true` if the key exists.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        match self.backend.read(&Self::prefixed(key)) {
            Ok(raw) => raw.is_some(),
            Err(err) => {
                warn!(key, %err, "storage read failed");
                false
            }
        }
    }

    /// Removes every key under this adapter's namespace.
    ///
    /// Records outside the namespace are untouched. Returns `false` if any
    /// deletion failed.
    pub fn clear(&self) -> bool {
        let keys = match self.backend.keys() {
            Ok(keys) => keys,
            Err(err) => {
                warn!(%err, "storage key listing failed");
                return false;
            }
        };

        let mut ok = true;
        for key in keys.iter().filter(|k| k.starts_with(NAMESPACE)) {
            if let Err(err) = self.backend.delete(key) {
                warn!(key, %err, "storage delete failed during clear");
                ok = false;
            }
        }
        ok
    }

    /// Lists the logical (namespace-stripped) keys under this adapter.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        match self.backend.keys() {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|k| k.strip_prefix(NAMESPACE).map(str::to_string))
                .collect(),
            Err(err) => {
                warn!(%err, "storage key listing failed");
                Vec::new()
            }
        }
    }

    /// Migrates the fixed legacy unprefixed key list into namespaced form.
    ///
    /// Idempotent: a legacy record is moved only when present, an existing
    /// namespaced destination is never overwritten (the stale legacy copy
    /// is discarded), and repeat runs are no-ops. Returns the number of
    /// records moved.
    pub fn migrate_legacy_keys(&self) -> usize {
        let mut moved = 0;

        for legacy in keys::LEGACY {
            let raw = match self.backend.read(legacy) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(err) => {
                    warn!(key = legacy, %err, "legacy read failed during migration");
                    continue;
                }
            };

            let destination = Self::prefixed(legacy);
            let occupied = matches!(self.backend.read(&destination), Ok(Some(_)));

            if occupied {
                debug!(key = legacy, "namespaced record exists, discarding legacy copy");
            } else if let Err(err) = self.backend.write(&destination, &raw) {
                warn!(key = legacy, %err, "legacy write failed during migration");
                continue;
            } else {
                moved += 1;
            }

            if let Err(err) = self.backend.delete(legacy) {
                warn!(key = legacy, %err, "legacy delete failed during migration");
            }
        }

        if moved > 0 {
            info!(moved, "migrated legacy storage records");
        }
        moved
    }
}
