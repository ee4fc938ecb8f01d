//! TTL-bounded response cache.
//!
//! Owned exclusively by [`ApiClient`](crate::ApiClient). Entries are
//! created on successful non-mutating requests, invalidated lazily at read
//! time against a fixed time-to-live, and never persisted beyond the page
//! session.

use parking_lot::Mutex;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Builds the deterministic cache key for a request.
///
/// The key is the canonical string of (method, URL, sorted query pairs), so
/// semantically identical requests hit the same entry regardless of
/// parameter order.
#[must_use]
pub fn cache_key(method: &Method, url: &str, query: &[(String, String)]) -> String {
    let mut pairs = query.to_vec();
    pairs.sort();

    let mut key = format!("{method} {url}");
    for (name, value) in &pairs {
        key.push_str("&");
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// In-memory response cache with lazy TTL invalidation.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a cache with the given time-to-live.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the cached value for `key` if it is still fresh.
    ///
    /// A stale entry is removed on the way out.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;

        if entry.stored_at.elapsed() > self.ttl {
            debug!(key, "cache entry expired");
            entries.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    /// Stores a value under `key`, refreshing its timestamp.
    pub fn put(&self, key: String, value: Value) {
        self.entries.lock().insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Returns the number of live (possibly stale) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_is_order_insensitive_over_params() {
        let a = cache_key(
            &Method::GET,
            "/api/users",
            &[("page".into(), "2".into()), ("limit".into(), "25".into())],
        );
        let b = cache_key(
            &Method::GET,
            "/api/users",
            &[("limit".into(), "25".into()), ("page".into(), "2".into())],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn key_distinguishes_method_url_and_params() {
        let get = cache_key(&Method::GET, "/api/users", &[]);
        let post = cache_key(&Method::POST, "/api/users", &[]);
        let other_url = cache_key(&Method::GET, "/api/exploits", &[]);
        let with_params =
            cache_key(&Method::GET, "/api/users", &[("page".into(), "2".into())]);

        assert_ne!(get, post);
        assert_ne!(get, other_url);
        assert_ne!(get, with_params);
    }

    #[test]
    fn fresh_entry_is_returned() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("k".into(), json!({ "count": 3 }));
        assert_eq!(cache.get("k"), Some(json!({ "count": 3 })));
    }

    #[test]
    fn stale_entry_is_dropped_on_read() {
        let cache = ResponseCache::new(Duration::from_millis(5));
        cache.put("k".into(), json!(1));

        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("a".into(), json!(1));
        cache.put("b".into(), json!(2));

        cache.clear();
        assert!(cache.is_empty());
    }
}
