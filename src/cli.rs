//! Command-line interface parsing for the Pokedex REPL
//!
//! This module handles parsing of CLI arguments using clap and validates them
//! into the `StartupConfig` the binary is built from.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::api::DEFAULT_BASE_URL;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// Cached responses need a positive lifetime
    #[error("Invalid cache interval: must be at least 1 second")]
    ZeroCacheInterval,

    /// Pages must contain at least one location area
    #[error("Invalid page size: must be at least 1")]
    ZeroPageSize,

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Pokedex - Explore PokeAPI location areas and catch Pokemon from your terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Interactive Pokedex backed by PokeAPI")]
#[command(version)]
pub struct Cli {
    /// Seconds an unread API response stays cached
    #[arg(long, value_name = "SECONDS", default_value_t = 5)]
    pub cache_interval: u64,

    /// PokeAPI base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of location areas shown per `map` page
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub page_size: u32,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Lifetime of unread cache entries and period of the cache reaper
    pub cache_interval: Duration,
    /// PokeAPI base URL without a trailing slash
    pub base_url: String,
    /// Location areas per page
    pub page_size: u32,
    /// Whether debug logging is enabled
    pub verbose: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_secs(5),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
            verbose: false,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if an argument is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_interval == 0 {
            return Err(CliError::ZeroCacheInterval);
        }
        if cli.page_size == 0 {
            return Err(CliError::ZeroPageSize);
        }

        let base_url = cli.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            cache_interval: Duration::from_secs(cli.cache_interval),
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: cli.page_size,
            verbose: cli.verbose,
        })
    }
}
