//! Cache store seam and the in-memory backend
//!
//! The host platform owns the real cache backend; this module defines the
//! `get`/`set`/`invalidate` surface the API manager talks to, plus a
//! process-local `MemoryCache` used as the default backend and in tests.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// A stored value together with its timestamps
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload
    data: Value,
    /// When the entry was written
    cached_at: DateTime<Utc>,
    /// When the entry stops being trusted
    expires_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug, Clone, PartialEq)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
    /// Absolute expiry timestamp the entry was stored with
    pub expires_at: DateTime<Utc>,
    /// Whether the cache entry has expired
    pub is_expired: bool,
}

/// Key/value store with absolute expiry timestamps
///
/// Expired entries may still be returned by `get` (with `is_expired = true`);
/// deciding whether to trust them is up to the caller. `set` is last-write-wins.
pub trait CacheStore: Send + Sync {
    /// Reads the entry stored under `key`, if any
    fn get(&self, key: &str) -> Option<CachedData<Value>>;

    /// Stores `value` under `key`, replacing any previous entry
    fn set(&self, key: &str, value: Value, expires_at: DateTime<Utc>);

    /// Removes the entry stored under `key`
    fn invalidate(&self, key: &str);
}

/// Process-local cache backend
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired ones included
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true when no entries are held
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<CachedData<Value>> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;

        let now = Utc::now();
        Some(CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
            expires_at: entry.expires_at,
            is_expired: now >= entry.expires_at,
        })
    }

    fn set(&self, key: &str, value: Value, expires_at: DateTime<Utc>) {
        let entry = CacheEntry {
            data: value,
            cached_at: Utc::now(),
            expires_at,
        };
        self.entries.write().insert(key.to_string(), entry);
    }

    fn invalidate(&self, key: &str) {
        self.entries.write().remove(key);
    }
}
