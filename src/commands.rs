//! REPL commands and the session state they operate on
//!
//! Each command turns user intent into one or more PokeAPI requests (all served
//! through the client's cache) and returns the text to show the user.

use std::collections::HashMap;
use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::api::{ApiError, LocationAreaPage, PokeApiClient, Pokemon};

/// Base experience at or above which a throw always succeeds
const CATCH_DIFFICULTY: f64 = 300.0;

/// Errors that can occur while executing a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required positional argument was not given
    #[error("missing argument: usage is `{command} <{argument}>`")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// The underlying API request failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// What the REPL should do after a command has run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the output and keep reading commands
    Continue(String),
    /// Print the output and stop
    Exit(String),
}

/// Mutable state shared by all commands during one REPL session
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    /// Link to the next page of location areas, once a page has been shown
    next_url: Option<String>,
    /// Link to the previous page of location areas
    previous_url: Option<String>,
    /// Pokemon caught so far, keyed by name
    pokedex: HashMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    /// Creates a fresh session with an entropy-seeded RNG
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a fresh session with a specific RNG (for reproducible throws)
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            next_url: None,
            previous_url: None,
            pokedex: HashMap::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Returns a caught Pokemon by name
    pub fn caught(&self, name: &str) -> Option<&Pokemon> {
        self.pokedex.get(name)
    }

    /// Names of every caught Pokemon, sorted alphabetically
    pub fn caught_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pokedex.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn apply_page(&mut self, page: &LocationAreaPage) -> String {
        self.next_url = page.next.clone();
        self.previous_url = page.previous.clone();

        let mut out = String::new();
        for area in &page.results {
            let _ = writeln!(out, "{}", area.name);
        }
        out
    }
}

/// Commands available at the `Pokedex >` prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// Returns a slice containing all commands, in help order.
    pub fn all() -> &'static [Command] {
        &[
            Command::Help,
            Command::Exit,
            Command::Map,
            Command::MapBack,
            Command::Explore,
            Command::Catch,
            Command::Inspect,
            Command::Pokedex,
        ]
    }

    /// The word typed at the prompt to run this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    /// One-line summary shown by `help`
    pub fn description(&self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the next page of location areas",
            Command::MapBack => "Displays the previous page of location areas",
            Command::Explore => "Lists the Pokemon that can be encountered in a location area",
            Command::Catch => "Throws a Pokeball at a Pokemon",
            Command::Inspect => "Shows details of a caught Pokemon",
            Command::Pokedex => "Lists all caught Pokemon",
        }
    }

    /// Parses a command word. Returns `None` for unknown words.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Command> {
        let word = s.trim().to_lowercase();
        Command::all()
            .iter()
            .copied()
            .find(|command| command.name() == word)
    }

    /// Runs the command against the session
    ///
    /// # Arguments
    /// * `session` - State shared across commands
    /// * `args` - Words following the command word
    ///
    /// # Returns
    /// * `Ok(Outcome)` with the text to print
    /// * `Err(CommandError)` if an argument is missing or a request fails
    pub async fn execute(
        &self,
        session: &mut Session,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        let output = match self {
            Command::Help => help(),
            Command::Exit => {
                return Ok(Outcome::Exit(
                    "Closing the Pokedex... Goodbye!\n".to_string(),
                ))
            }
            Command::Map => map(session).await?,
            Command::MapBack => map_back(session).await?,
            Command::Explore => explore(session, self.require(args, "area")?).await?,
            Command::Catch => catch(session, self.require(args, "pokemon")?).await?,
            Command::Inspect => inspect(session, self.require(args, "pokemon")?),
            Command::Pokedex => pokedex(session),
        };
        Ok(Outcome::Continue(output))
    }

    fn require<'a>(&self, args: &'a [String], argument: &'static str) -> Result<&'a str, CommandError> {
        args.first()
            .map(String::as_str)
            .ok_or(CommandError::MissingArgument {
                command: self.name(),
                argument,
            })
    }
}

/// Returns true if a throw with `roll` in `[0, 1)` catches a Pokemon of the given base experience
///
/// Higher base experience makes a catch less likely; at 300 or above every throw succeeds.
pub fn is_caught(base_experience: u32, roll: f64) -> bool {
    roll >= 1.0 - f64::from(base_experience) / CATCH_DIFFICULTY
}

fn help() -> String {
    let mut out = String::from("Welcome to the Pokedex!\nUsage:\n\n");
    for command in Command::all() {
        let _ = writeln!(out, "{}: {}", command.name(), command.description());
    }
    out.push('\n');
    out
}

async fn map(session: &mut Session) -> Result<String, CommandError> {
    let page = session
        .client
        .location_areas(session.next_url.as_deref())
        .await?;
    Ok(session.apply_page(&page))
}

async fn map_back(session: &mut Session) -> Result<String, CommandError> {
    let Some(url) = session.previous_url.clone() else {
        return Ok("you're on the first page\n".to_string());
    };

    let page = session.client.location_areas(Some(&url)).await?;
    Ok(session.apply_page(&page))
}

async fn explore(session: &Session, area: &str) -> Result<String, CommandError> {
    let detail = session.client.location_area(area).await?;

    let mut out = String::from("Pokemon in this location:\n");
    for encounter in &detail.pokemon_encounters {
        let _ = writeln!(out, "- {}", encounter.pokemon.name);
    }
    Ok(out)
}

async fn catch(session: &mut Session, name: &str) -> Result<String, CommandError> {
    if session.pokedex.contains_key(name) {
        return Ok(format!("you have already caught a {}\n", name));
    }

    let pokemon = match session.client.pokemon(name).await {
        Ok(pokemon) => pokemon,
        Err(err) if err.is_not_found() => return Ok(format!("{} is not a pokemon\n", name)),
        Err(err) => return Err(err.into()),
    };

    let mut out = format!("Throwing a Pokeball at {}...\n", pokemon.name);
    let roll: f64 = session.rng.gen();
    if is_caught(pokemon.base_experience, roll) {
        let _ = writeln!(out, "{} was caught!", pokemon.name);
        tracing::debug!(pokemon = %pokemon.name, roll, "caught");
        session.pokedex.insert(pokemon.name.clone(), pokemon);
    } else {
        let _ = writeln!(out, "{} escaped!", pokemon.name);
    }
    Ok(out)
}

fn inspect(session: &Session, name: &str) -> String {
    let Some(pokemon) = session.pokedex.get(name) else {
        return format!("{} was not caught yet!\n", name);
    };

    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", pokemon.name);
    let _ = writeln!(out, "Height: {}", pokemon.height);
    let _ = writeln!(out, "Weight: {}", pokemon.weight);
    out.push_str("Stats:\n");
    for stat in &pokemon.stats {
        let _ = writeln!(out, "\t{}: {}", stat.stat.name, stat.base_stat);
    }
    out.push_str("Types:\n");
    for kind in &pokemon.types {
        let _ = writeln!(out, "\t{}", kind.kind.name);
    }
    out
}

fn pokedex(session: &Session) -> String {
    let mut out = String::from("Your Pokedex:\n");
    for name in session.caught_names() {
        let _ = writeln!(out, "- {}", name);
    }
    out
}
