//! Pokedex - A command-line Pokedex backed by PokeAPI
//!
//! Fetches go through a cache-aside decorator over an in-memory TTL cache
//! whose expired entries are reclaimed by a background sweep.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::{CachingFetcher, DataSource, HttpClient};
pub use cache::{Cache, TtlCache};
pub use config::Config;
pub use tasks::spawn_sweep_task;
