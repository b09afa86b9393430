//! Pokedex CLI Library
//!
//! Exposes the response cache, PokeAPI client, commands and REPL for the binary
//! and for integration tests.

pub mod api;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod logging;
pub mod repl;
