//! Configuration Module
//!
//! Handles loading runtime configuration from environment variables, with
//! command-line flags layered on top by the binary.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Default PokeAPI root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long a fetched response stays cached
    pub cache_ttl: Duration,
    /// How often the background sweep purges expired entries
    pub sweep_interval: Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// PokeAPI root URL
    pub base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Cache entry lifetime in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `REQUEST_TIMEOUT` - HTTP timeout in seconds (default: 5)
    /// - `API_BASE_URL` - PokeAPI root (default: https://pokeapi.co/api/v2)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: secs_from_env("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            sweep_interval: secs_from_env("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            request_timeout: secs_from_env("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
            base_url: env::var("API_BASE_URL").unwrap_or(defaults.base_url),
        }
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration("cache TTL"));
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("sweep interval"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("request timeout"));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(5),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn secs_from_env(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .map(Duration::from_secs)
}
