//! Pokedex CLI - explore PokeAPI from an interactive prompt
//!
//! Location areas and Pokemon are fetched from PokeAPI through an in-memory
//! response cache whose entries expire when left unread.

use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use pokedex::api::PokeApiClient;
use pokedex::cache::TtlCache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::commands::Session;
use pokedex::{logging, repl};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    };

    logging::init(config.verbose);
    tracing::debug!(?config, "starting");

    // One cache for the whole process, shared with every request path
    let cache = Arc::new(TtlCache::new(config.cache_interval)?);
    let client = PokeApiClient::with_base_url(Arc::clone(&cache), config.base_url)
        .with_page_size(config.page_size);
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    repl::run(&mut session, stdin, &mut stdout).await?;

    cache.shutdown().await;

    Ok(())
}
