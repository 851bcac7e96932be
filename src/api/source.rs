//! Data source trait
//!
//! The narrow fetch interface the rest of the crate consumes. Both the HTTP
//! client and the caching decorator implement it, so callers cannot tell
//! them apart.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches a page of location areas: the first page when `page` is `None`,
    /// otherwise the page at the given URL (a `next`/`previous` link).
    async fn location_areas(&self, page: Option<&str>) -> Result<LocationAreaPage>;

    /// Fetches the encounters of the named location area.
    async fn location_area(&self, name: &str) -> Result<LocationArea>;

    /// Fetches a creature by name.
    async fn pokemon(&self, name: &str) -> Result<Pokemon>;
}
