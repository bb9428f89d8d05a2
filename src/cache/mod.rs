//! Expiring key/value store with pattern invalidation.
//!
//! One [`DataCache`] instance is constructed at application start and handed
//! to each engine as a shared dependency; there is no module-level singleton.
//! Entries expire lazily on read, there is no background sweep.

pub mod keys;

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default entry lifetime: 48 hours.
const CACHE_DURATION_HOURS: i64 = 48;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: serde_json::Value,
    #[allow(dead_code)]
    timestamp: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Snapshot of the cache contents, useful for debugging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

/// Generic TTL cache for derived metric values.
///
/// Values are stored as JSON so the cache stays untyped at runtime, the way
/// the consuming dashboard treats it. A cached value that no longer
/// deserializes into the requested type reads as a miss rather than an
/// error; the caller recomputes and overwrites it.
#[derive(Debug, Default)]
pub struct DataCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key` if present and not expired.
    /// An expired entry is removed on the way out. Never fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().unwrap();
        let expired = Utc::now() > entries.get(key)?.expires_at;
        if expired {
            entries.remove(key);
            tracing::debug!(key, "cache entry expired");
            return None;
        }
        serde_json::from_value(entries.get(key)?.data.clone()).ok()
    }

    /// Stores `data` under `key` with the default 48 h lifetime, replacing
    /// any prior entry wholesale.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) {
        self.set_for(key, data, Duration::hours(CACHE_DURATION_HOURS));
    }

    /// Stores `data` under `key` with a custom lifetime.
    pub fn set_for<T: Serialize>(&self, key: &str, data: &T, duration: Duration) {
        let value = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key, %error, "failed to serialize cache value; skipping");
                return;
            }
        };
        let now = Utc::now();
        let entry = CacheEntry {
            data: value,
            timestamp: now,
            expires_at: now + duration,
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
    }

    /// Deletes the given keys; missing keys are a no-op.
    pub fn invalidate(&self, keys: &[&str]) {
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(*key);
        }
    }

    /// Deletes every key matching `pattern`.
    pub fn invalidate_pattern(&self, pattern: &Regex) {
        let mut entries = self.entries.lock().unwrap();
        let matched: Vec<String> = entries
            .keys()
            .filter(|key| pattern.is_match(key))
            .cloned()
            .collect();
        for key in &matched {
            entries.remove(key);
        }
        if !matched.is_empty() {
            tracing::debug!(pattern = %pattern, count = matched.len(), "invalidated keys");
        }
    }

    /// Empties the store.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            size: entries.len(),
            keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() {
        let cache = DataCache::new();
        cache.set("a", &42u32);
        assert_eq!(cache.get::<u32>("a"), Some(42));
    }

    #[test]
    fn get_missing_key_is_none() {
        let cache = DataCache::new();
        assert_eq!(cache.get::<u32>("missing"), None);
    }

    #[test]
    fn expired_entry_is_removed_on_read() {
        let cache = DataCache::new();
        cache.set_for("a", &1u32, Duration::milliseconds(-1));
        assert_eq!(cache.get::<u32>("a"), None);
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn set_replaces_prior_entry() {
        let cache = DataCache::new();
        cache.set("a", &1u32);
        cache.set("a", &2u32);
        assert_eq!(cache.get::<u32>("a"), Some(2));
        assert_eq!(cache.stats().size, 1);
    }

    #[test]
    fn invalidate_removes_only_named_keys() {
        let cache = DataCache::new();
        cache.set("a", &1u32);
        cache.set("b", &2u32);
        cache.invalidate(&["a", "never-set"]);
        assert_eq!(cache.get::<u32>("a"), None);
        assert_eq!(cache.get::<u32>("b"), Some(2));
    }

    #[test]
    fn invalidate_pattern_removes_exactly_matching_keys() {
        let cache = DataCache::new();
        cache.set("landing:total-balance:1", &1u32);
        cache.set("landing:balance-trend:1", &2u32);
        cache.set("planned:upcoming:1:2026-8", &3u32);
        let pattern = Regex::new(r"^landing:").unwrap();
        cache.invalidate_pattern(&pattern);
        assert_eq!(cache.stats().keys, vec!["planned:upcoming:1:2026-8"]);
    }

    #[test]
    fn clear_empties_the_store() {
        let cache = DataCache::new();
        cache.set("a", &1u32);
        cache.set("b", &2u32);
        cache.clear();
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn mismatched_type_reads_as_miss() {
        let cache = DataCache::new();
        cache.set("a", &"not a number");
        assert_eq!(cache.get::<u32>("a"), None);
    }
}
