//! Cache Module
//!
//! Provides an in-memory byte cache with TTL expiration and a background sweep.

mod clock;
mod entry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::{CacheStats, StatsRecorder};
pub use store::CacheStore;
pub use ttl_cache::{Cache, TtlCache, MIN_SWEEP_INTERVAL};
