//! Cache Store Module
//!
//! The map behind the cache lock. Every method takes the current instant from
//! the caller so the store itself never reads a clock.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key-value storage with per-entry expiry.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` after `now`.
    ///
    /// If the key already exists, the value is overwritten and the expiry reset.
    pub fn set(&mut self, key: String, value: Vec<u8>, now: DateTime<Utc>, ttl: Duration) {
        self.entries.insert(key, CacheEntry::new(value, now, ttl));
    }

    // == Get ==
    /// Returns a copy of the value for `key` if present and not expired as of `now`.
    ///
    /// Expired entries are left in place for the sweep to collect.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<u8>> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.clone())
    }

    // == Clear ==
    /// Discards every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Cleanup Expired ==
    /// Removes all entries expired as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of physically stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
