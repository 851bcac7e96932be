//! TTL Cache Module
//!
//! Concurrent handle over a [`CacheStore`] guarded by a single reader/writer
//! lock, with a background sweep bound to the handle's lifetime.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStore, Clock, SystemClock};
use crate::tasks::{spawn_sweep_task, SweepHandle};

/// Shortest sweep interval accepted; smaller values are raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// == Cache Trait ==
/// Byte-oriented cache used by the caching fetcher.
///
/// All operations are total: absence is reported as `None`, never as an error.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns a copy of the live value stored under `key`.
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration);

    /// Discards every entry.
    async fn clear(&self);
}

// == TTL Cache ==
/// In-memory cache with per-entry expiry and a periodic background sweep.
///
/// Construction spawns the sweep task, so it must happen inside a Tokio
/// runtime. The sweep stops on [`TtlCache::stop`], [`TtlCache::shutdown`],
/// or when the cache is dropped.
#[derive(Debug)]
pub struct TtlCache {
    store: Arc<RwLock<CacheStore>>,
    clock: Arc<dyn Clock>,
    sweeper: SweepHandle,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache using wall-clock time.
    pub fn new(sweep_interval: Duration) -> Self {
        Self::with_clock(sweep_interval, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(sweep_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new()));
        let sweeper = spawn_sweep_task(
            store.clone(),
            clock.clone(),
            sweep_interval.max(MIN_SWEEP_INTERVAL),
        );

        Self {
            store,
            clock,
            sweeper,
        }
    }

    // == Length ==
    /// Returns the number of physically stored entries, including expired
    /// entries the sweep has not collected yet.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if nothing is physically stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Lifetime ==
    /// Returns true while the background sweep is alive.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.is_running()
    }

    /// Cancels the background sweep. Stored entries remain readable and
    /// `get` keeps hiding expired ones.
    pub fn stop(&self) {
        self.sweeper.stop();
    }

    /// Cancels the background sweep and waits for it to exit.
    pub async fn shutdown(self) {
        self.sweeper.shutdown().await;
    }
}

#[async_trait]
impl Cache for TtlCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let store = self.store.read().await;
        store.get(key, self.clock.now())
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) {
        let mut store = self.store.write().await;
        store.set(key.to_string(), value, self.clock.now(), ttl);
    }

    async fn clear(&self) {
        self.store.write().await.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use chrono::{TimeDelta, Utc};

    const HOUR: Duration = Duration::from_secs(3600);

    fn manual_cache() -> (TtlCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = TtlCache::with_clock(HOUR, clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_set_then_get_within_ttl() {
        let cache = TtlCache::new(Duration::from_millis(100));

        for (key, value) in [
            ("https://example.com", &b"test data"[..]),
            ("https://example.com/path", &b"more test data"[..]),
        ] {
            cache.set(key, value.to_vec(), Duration::from_secs(2)).await;
            assert_eq!(cache.get(key).await.as_deref(), Some(value));
        }
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (cache, _clock) = manual_cache();
        assert!(cache.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_expiry_boundary() {
        let (cache, clock) = manual_cache();
        cache.set("k", b"v".to_vec(), Duration::from_secs(5)).await;

        clock.advance(TimeDelta::seconds(5));
        assert_eq!(cache.get("k").await, Some(b"v".to_vec()), "valid at exactly expires_at");

        clock.advance(TimeDelta::nanoseconds(1));
        assert!(cache.get("k").await.is_none(), "expired just past expires_at");
    }

    #[tokio::test]
    async fn test_expired_entry_hidden_before_sweep() {
        let (cache, clock) = manual_cache();
        cache.set("k", b"v".to_vec(), Duration::from_millis(10)).await;

        clock.advance(TimeDelta::seconds(1));

        assert!(cache.get("k").await.is_none());
        // Sweep interval is an hour, so the entry is still stored
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_overwrite_live_entry() {
        let (cache, _clock) = manual_cache();
        cache.set("k", b"first".to_vec(), HOUR).await;
        cache.set("k", b"second".to_vec(), HOUR).await;

        assert_eq!(cache.get("k").await, Some(b"second".to_vec()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_is_total() {
        let (cache, _clock) = manual_cache();
        let keys = ["a", "b", "c"];
        for key in keys {
            cache.set(key, key.as_bytes().to_vec(), HOUR).await;
        }

        cache.clear().await;

        for key in keys {
            assert!(cache.get(key).await.is_none());
        }
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_returns_independent_copy() {
        let (cache, _clock) = manual_cache();
        cache.set("k", b"abc".to_vec(), HOUR).await;

        let mut copy = cache.get("k").await.unwrap();
        copy[0] = b'z';

        assert_eq!(cache.get("k").await, Some(b"abc".to_vec()));
    }

    #[tokio::test]
    async fn test_sweep_physically_removes_expired_entries() {
        let ttl = Duration::from_millis(20);
        let sweep_interval = Duration::from_millis(30);
        let cache = TtlCache::new(sweep_interval);

        cache.set("expire", b"v".to_vec(), ttl).await;
        cache.set("keep", b"v".to_vec(), HOUR).await;
        assert_eq!(cache.len().await, 2);

        tokio::time::sleep(ttl.max(sweep_interval) * 4).await;

        assert!(cache.get("expire").await.is_none());
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("keep").await.is_some());
    }

    #[tokio::test]
    async fn test_stop_ends_sweep_within_one_interval() {
        let sweep_interval = Duration::from_millis(50);
        let cache = TtlCache::new(sweep_interval);
        assert!(cache.is_sweeping());

        cache.stop();
        tokio::time::sleep(sweep_interval).await;

        assert!(!cache.is_sweeping());
    }

    #[tokio::test]
    async fn test_shutdown_awaits_sweep_exit() {
        let cache = TtlCache::new(HOUR);
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_zero_sweep_interval_is_clamped() {
        let cache = TtlCache::new(Duration::ZERO);
        assert!(cache.is_sweeping());
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_concurrent_access() {
        let cache = Arc::new(TtlCache::new(Duration::from_millis(5)));
        let mut handles = Vec::new();

        for worker in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    let key = format!("key-{}", i % 10);
                    cache.set(&key, vec![worker as u8], HOUR).await;
                    // A concurrent clear may have run in between
                    if let Some(value) = cache.get(&key).await {
                        assert_eq!(value.len(), 1);
                    }
                    if i % 17 == 0 {
                        cache.clear().await;
                    }
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert!(cache.len().await <= 10);
    }
}
