//! PokeAPI models
//!
//! Serde shapes for the parts of PokeAPI responses this tool reads. Every
//! type round-trips through JSON so the caching fetcher can store it as bytes.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{Encounter, LocationArea, LocationAreaPage, NamedResource};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
