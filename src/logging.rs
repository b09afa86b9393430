//! Tracing subscriber setup
//!
//! Logs go to stderr so they never interleave with REPL output on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "pokedex=debug,warn"
    } else {
        "pokedex=warn"
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(false), "pokedex=warn");
        assert_eq!(default_filter(true), "pokedex=debug,warn");
    }

    #[test]
    fn test_default_filters_parse() {
        for verbose in [false, true] {
            assert!(default_filter(verbose).parse::<EnvFilter>().is_ok());
        }
    }
}
