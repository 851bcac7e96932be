//! Pokemon model
//!
//! `GET /pokemon/{name}/`, reduced to what `catch` and `inspect` need.

use serde::{Deserialize, Serialize};

use super::NamedResource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Missing for some forms; treated as 0
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl Pokemon {
    /// Base experience, or 0 when the API does not report one.
    pub fn base_experience(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }
}
