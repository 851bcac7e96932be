//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror. The cache itself has no
//! error type: its operations cannot fail.

use thiserror::Error;

// == Api Error Enum ==
/// Failure of a data source fetch. Propagated to the caller and never cached.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure (connect, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Upstream body was not the expected JSON
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A locator could not be turned into a request URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

// == Config Error Enum ==
/// Invalid configuration value.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration setting was zero
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The API base URL was empty
    #[error("API base URL cannot be empty")]
    EmptyBaseUrl,
}

// == Command Error Enum ==
/// Failure of a REPL command. The loop reports it and keeps going.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A command that needs an argument was given none
    #[error("{command} needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    /// The fetch behind the command failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing command output failed
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for data source operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            url: "https://pokeapi.co/api/v2/pokemon/missingno/".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://pokeapi.co/api/v2/pokemon/missingno/ returned status 404"
        );
    }

    #[test]
    fn test_missing_argument_message() {
        let err = CommandError::MissingArgument {
            command: "catch",
            what: "a Pokemon name",
        };
        assert_eq!(err.to_string(), "catch needs a Pokemon name");
    }

    #[test]
    fn test_api_error_is_transparent_in_command_error() {
        let err: CommandError = ApiError::InvalidUrl("::".to_string()).into();
        assert_eq!(err.to_string(), "invalid URL: ::");
    }

    #[test]
    fn test_config_error_message() {
        assert_eq!(
            ConfigError::ZeroDuration("cache TTL").to_string(),
            "cache TTL must be greater than zero"
        );
    }
}
