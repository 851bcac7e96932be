//! Command parsing
//!
//! Turns a line of user input into a [`Command`].

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(Option<String>),
    Catch(Option<String>),
    Inspect(Option<String>),
    Pokedex,
    CacheStats,
    ClearCache,
    Unknown(String),
}

/// Name and description of every command, in help order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Displays the names of the next 20 location areas"),
    ("mapb", "Displays the names of the previous 20 location areas"),
    ("explore <area>", "Lists the Pokemon found in a location area"),
    ("catch <pokemon>", "Tries to catch a Pokemon and add it to your Pokedex"),
    ("inspect <pokemon>", "Shows details of a Pokemon you have caught"),
    ("pokedex", "Lists the Pokemon you have caught"),
    ("cache", "Shows cache statistics"),
    ("clearcache", "Empties the cache so the next requests fetch fresh data"),
];

/// Lowercases `input` and splits it on whitespace.
pub fn clean_input(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

impl Command {
    /// Parses one input line. Returns `None` for a blank line.
    pub fn parse(input: &str) -> Option<Self> {
        let mut words = clean_input(input).into_iter();
        let name = words.next()?;
        let arg = words.next();

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore(arg),
            "catch" => Command::Catch(arg),
            "inspect" => Command::Inspect(arg),
            "pokedex" => Command::Pokedex,
            "cache" => Command::CacheStats,
            "clearcache" => Command::ClearCache,
            _ => Command::Unknown(name),
        };
        Some(command)
    }
}
