//! Pokedex - A command-line Pokedex backed by PokeAPI
//!
//! Browse location areas, explore them, catch and inspect Pokemon. Responses
//! are cached in memory for the configured TTL.

use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, Session};
use pokedex::{CachingFetcher, Config, HttpClient, TtlCache};

/// A command-line Pokedex backed by PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse PokeAPI location areas and catch Pokemon")]
#[command(version)]
struct Cli {
    /// Seconds a fetched response stays cached [env: CACHE_TTL]
    #[arg(long, value_name = "SECS")]
    cache_ttl: Option<u64>,

    /// Seconds between sweeps of expired cache entries [env: SWEEP_INTERVAL]
    #[arg(long, value_name = "SECS")]
    sweep_interval: Option<u64>,

    /// HTTP request timeout in seconds [env: REQUEST_TIMEOUT]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// PokeAPI root URL [env: API_BASE_URL]
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    fn apply(self, mut config: Config) -> Config {
        if let Some(secs) = self.cache_ttl {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = self.sweep_interval {
            config.sweep_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        config
    }
}

/// Main entry point for the Pokedex.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables and flags
/// 3. Create the TTL cache, which starts its background sweep
/// 4. Wrap the HTTP client in the caching fetcher
/// 5. Run the command loop on stdin/stdout
/// 6. Stop the sweep on exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the way of the prompt,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Cli::parse().apply(Config::from_env());
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: cache_ttl={:?}, sweep_interval={:?}, timeout={:?}, base_url={}",
        config.cache_ttl, config.sweep_interval, config.request_timeout, config.base_url
    );

    let client = HttpClient::new(&config.base_url, config.request_timeout)
        .context("could not build HTTP client")?;
    let cache = TtlCache::new(config.sweep_interval);
    info!("Cache initialized");

    let fetcher = CachingFetcher::new(client, cache, config.cache_ttl);
    let mut session = Session::new(fetcher);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    repl::run(&mut session, stdin, &mut stdout)
        .await
        .context("terminal I/O failed")?;

    // Stop the background sweep before the runtime goes away
    let fetcher = session.into_fetcher();
    let (_, cache) = fetcher.into_parts();
    cache.shutdown().await;
    info!("Shutdown complete");

    Ok(())
}
