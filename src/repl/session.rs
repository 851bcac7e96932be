//! REPL session
//!
//! Holds the state that lives across commands (paging cursor and the caught
//! collection) and executes parsed commands against the caching fetcher.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::api::{CachingFetcher, DataSource};
use crate::cache::TtlCache;
use crate::error::CommandError;
use crate::models::{LocationAreaPage, Pokemon};
use crate::repl::command::{Command, COMMANDS};

/// Range of the catch roll; a roll above the target's base experience catches it.
pub const CATCH_ROLL: std::ops::RangeInclusive<u32> = 50..=250;

/// Whether the REPL should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State shared by all commands of one REPL run.
pub struct Session<S, R = StdRng> {
    fetcher: CachingFetcher<S, TtlCache>,
    next_page: Option<String>,
    previous_page: Option<String>,
    /// Set once `map` has shown a page
    listed: bool,
    caught: BTreeMap<String, Pokemon>,
    rng: R,
}

impl<S: DataSource> Session<S, StdRng> {
    /// Creates a session with an entropy-seeded catch roll.
    pub fn new(fetcher: CachingFetcher<S, TtlCache>) -> Self {
        Self::with_rng(fetcher, StdRng::from_entropy())
    }
}

impl<S: DataSource, R: Rng> Session<S, R> {
    pub fn with_rng(fetcher: CachingFetcher<S, TtlCache>, rng: R) -> Self {
        Self {
            fetcher,
            next_page: None,
            previous_page: None,
            listed: false,
            caught: BTreeMap::new(),
            rng,
        }
    }

    pub fn fetcher(&self) -> &CachingFetcher<S, TtlCache> {
        &self.fetcher
    }

    /// The caught collection, keyed by name.
    pub fn caught(&self) -> &BTreeMap<String, Pokemon> {
        &self.caught
    }

    /// Consumes the session and hands back the fetcher (to shut its cache down).
    pub fn into_fetcher(self) -> CachingFetcher<S, TtlCache> {
        self.fetcher
    }

    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Flow, CommandError> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => {
                let area = area.ok_or(CommandError::MissingArgument {
                    command: "explore",
                    what: "a location area name",
                })?;
                self.explore(&area, out).await?
            }
            Command::Catch(name) => {
                let name = name.ok_or(CommandError::MissingArgument {
                    command: "catch",
                    what: "a Pokemon name",
                })?;
                self.catch(&name, out).await?
            }
            Command::Inspect(name) => {
                let name = name.ok_or(CommandError::MissingArgument {
                    command: "inspect",
                    what: "a Pokemon name",
                })?;
                self.inspect(&name, out)?
            }
            Command::Pokedex => self.pokedex(out)?,
            Command::CacheStats => self.cache_stats(out).await?,
            Command::ClearCache => {
                self.fetcher.clear().await;
                info!("cache cleared by user");
                writeln!(out, "Cache cleared")?;
            }
            Command::Unknown(_) => writeln!(out, "Unknown command")?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (usage, description) in COMMANDS {
            writeln!(out, "{}: {}", usage, description)?;
        }
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        if self.listed && self.next_page.is_none() {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        }
        let page = self.fetcher.location_areas(self.next_page.as_deref()).await?;
        self.show_page(page, out)
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        let Some(previous) = self.previous_page.as_deref() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        let page = self.fetcher.location_areas(Some(previous)).await?;
        self.show_page(page, out)
    }

    fn show_page<W: Write>(&mut self, page: LocationAreaPage, out: &mut W) -> Result<(), CommandError> {
        self.next_page = page.next;
        self.previous_page = page.previous;
        self.listed = true;
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Exploring {}...", area)?;
        let location = self.fetcher.location_area(area).await?;

        if location.pokemon_encounters.is_empty() {
            writeln!(out, "No Pokemon found in location area '{}'.", area)?;
            return Ok(());
        }

        writeln!(out, "Found Pokemon:")?;
        for name in location.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let pokemon = self.fetcher.pokemon(name).await?;

        let roll = self.rng.gen_range(CATCH_ROLL);
        if roll > pokemon.base_experience() {
            writeln!(out, "{} was caught!", name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.caught.insert(name.to_string(), pokemon);
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let Some(pokemon) = self.caught.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "ID: {}", pokemon.id)?;
        writeln!(out, "Base Experience: {}", pokemon.base_experience())?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn pokedex<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        if self.caught.is_empty() {
            writeln!(out, "You haven't caught any Pokemon yet")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in self.caught.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn cache_stats<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        let stats = self.fetcher.stats();
        writeln!(out, "Hits: {}", stats.hits)?;
        writeln!(out, "Misses: {}", stats.misses)?;
        writeln!(out, "Hit rate: {:.1}%", stats.hit_rate() * 100.0)?;
        writeln!(out, "Discarded entries: {}", stats.decode_failures)?;
        writeln!(out, "Stored entries: {}", self.fetcher.cache().len().await)?;
        writeln!(out, "Entry TTL: {}s", self.fetcher.ttl().as_secs())?;
        Ok(())
    }
}
