//! Cache key construction
//!
//! Keys are `"<kind>:<locator>"`. Distinct requests never share a key and the
//! same request always maps to the same key.

use std::fmt;

/// Locator used for the first page of the location listing.
pub const FIRST_PAGE: &str = "default";

/// The kind of resource a key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A page of the location area listing
    Locations,
    /// A single location area's encounters
    Location,
    /// A single creature
    Pokemon,
}

impl ResourceKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ResourceKind::Locations => "locations",
            ResourceKind::Location => "location",
            ResourceKind::Pokemon => "pokemon",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Builds the key for `kind` at `locator`.
pub fn cache_key(kind: ResourceKind, locator: &str) -> String {
    format!("{}:{}", kind, locator)
}

/// Builds the key for a listing page; `None` is the first page.
pub fn page_key(page: Option<&str>) -> String {
    cache_key(ResourceKind::Locations, page.unwrap_or(FIRST_PAGE))
}
