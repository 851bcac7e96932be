//! Caching fetcher
//!
//! Cache-aside decorator over any [`DataSource`]. Results are stored as JSON
//! bytes under a key derived from the operation and its locator.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::api::keys::{cache_key, page_key, ResourceKind};
use crate::api::DataSource;
use crate::cache::{Cache, CacheStats, StatsRecorder, TtlCache};
use crate::error::Result;
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Wraps a data source so repeated requests are served from a cache.
///
/// On a hit the source is not called. On a miss the source is called outside
/// any cache lock, and only a successful result is stored. A cached payload
/// that no longer decodes is treated as a miss.
#[derive(Debug)]
pub struct CachingFetcher<S, C = TtlCache> {
    source: S,
    cache: C,
    ttl: Duration,
    stats: StatsRecorder,
}

impl<S, C> CachingFetcher<S, C>
where
    S: DataSource,
    C: Cache,
{
    /// Wraps `source`, storing results in `cache` for `ttl`.
    pub fn new(source: S, cache: C, ttl: Duration) -> Self {
        Self {
            source,
            cache,
            ttl,
            stats: StatsRecorder::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Unwraps the decorator into its source and cache.
    pub fn into_parts(self) -> (S, C) {
        (self.source, self.cache)
    }

    /// Hit/miss counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Invalidates everything in the underlying cache.
    pub async fn clear(&self) {
        self.cache.clear().await;
        debug!("cache cleared");
    }

    /// Serves `key` from the cache, or awaits `fetch` and caches its success.
    ///
    /// `fetch` is only polled on a miss.
    async fn through_cache<T, F>(&self, key: String, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: Future<Output = Result<T>> + Send,
    {
        let started = Instant::now();
        if let Some(bytes) = self.cache.get(&key).await {
            match serde_json::from_slice::<T>(&bytes) {
                Ok(value) => {
                    self.stats.record_hit();
                    debug!(key = %key, elapsed = ?started.elapsed(), "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    self.stats.record_decode_failure();
                    warn!(key = %key, error = %e, "discarding undecodable cache entry");
                }
            }
        }

        self.stats.record_miss();
        debug!(key = %key, "cache miss");

        let value = fetch.await?;

        match serde_json::to_vec(&value) {
            Ok(bytes) => self.cache.set(&key, bytes, self.ttl).await,
            Err(e) => warn!(key = %key, error = %e, "could not encode result for caching"),
        }

        Ok(value)
    }
}

#[async_trait]
impl<S, C> DataSource for CachingFetcher<S, C>
where
    S: DataSource,
    C: Cache,
{
    async fn location_areas(&self, page: Option<&str>) -> Result<LocationAreaPage> {
        self.through_cache(page_key(page), self.source.location_areas(page))
            .await
    }

    async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.through_cache(
            cache_key(ResourceKind::Location, name),
            self.source.location_area(name),
        )
        .await
    }

    async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.through_cache(
            cache_key(ResourceKind::Pokemon, name),
            self.source.pokemon(name),
        )
        .await
    }
}
