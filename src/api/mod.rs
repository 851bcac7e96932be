//! API Module
//!
//! Data sources for PokeAPI resources and the caching decorator over them.
//!
//! # Operations
//! - `location_areas` - One page of location areas (first page or a page URL)
//! - `location_area` - Encounters in a named area
//! - `pokemon` - A single creature by name

pub mod cached;
pub mod client;
pub mod keys;
pub mod source;

pub use cached::CachingFetcher;
pub use client::HttpClient;
pub use keys::{cache_key, page_key, ResourceKind};
pub use source::DataSource;
