//! Integration tests for the pokedex binary
//!
//! Runs the compiled binary with piped stdin. No test issues network requests.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Helper to run the CLI with given args and stdin, capturing output
fn run_cli(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pokedex"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute pokedex");

    // The child may exit before reading (e.g. --help), so a broken pipe is fine
    let mut pipe = child.stdin.take().expect("stdin should be piped");
    let _ = pipe.write_all(stdin.as_bytes());
    drop(pipe);

    child.wait_with_output().expect("Failed to wait for pokedex")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"], "");
    assert!(output.status.success(), "Expected --help to exit successfully");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pokedex"), "Help should mention pokedex");
    assert!(stdout.contains("--cache-interval"), "Help should mention --cache-interval");
}

#[test]
fn test_zero_cache_interval_prints_error_and_exits() {
    let output = run_cli(&["--cache-interval", "0"], "");
    assert!(!output.status.success(), "Expected zero interval to fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid cache interval"),
        "Should print error message about the interval: {}",
        stderr
    );
}

#[test]
fn test_invalid_base_url_prints_error_and_exits() {
    let output = run_cli(&["--base-url", "pokeapi.co"], "");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid base URL"), "stderr: {}", stderr);
}

#[test]
fn test_repl_help_then_exit() {
    let output = run_cli(&[], "help\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Pokedex > "));
    assert!(stdout.contains("Welcome to the Pokedex!"));
    assert!(stdout.contains("catch: "));
    assert!(stdout.ends_with("Closing the Pokedex... Goodbye!\n"));
}

#[test]
fn test_repl_exits_on_end_of_input() {
    let output = run_cli(&[], "pokedex\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Your Pokedex:"));
}

#[test]
fn test_repl_reports_unknown_command() {
    let output = run_cli(&[], "teleport\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("teleport is not a command."));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use pokedex::cli::{Cli, CliError, StartupConfig};
    use std::time::Duration;

    #[test]
    fn test_cli_cache_interval_flag() {
        let cli = Cli::parse_from(["pokedex", "--cache-interval", "60"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_cli_zero_cache_interval_is_error() {
        let cli = Cli::parse_from(["pokedex", "--cache-interval", "0"]);
        assert_eq!(
            StartupConfig::from_cli(&cli).unwrap_err(),
            CliError::ZeroCacheInterval
        );
    }

    #[test]
    fn test_cli_base_url_trailing_slash_trimmed() {
        let cli = Cli::parse_from(["pokedex", "--base-url", "https://example.test/api/v2/"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.base_url, "https://example.test/api/v2");
    }
}
