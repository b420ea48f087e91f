//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Mapping lookup failures to messages and exit codes

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

const DEBUG_DIRECTIVES: &str = "weather_cli=debug,weather_core=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.debug);
    cmd.run().await
}

/// Initialize global tracing subscriber on stderr.
///
/// `RUST_LOG` directives apply when set, and `--debug` turns on debug output
/// for our crates on top of them. With neither, logging stays off.
fn init_tracing(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = EnvFilter::new(filter_directives(rust_log.as_deref(), debug));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn filter_directives(rust_log: Option<&str>, debug: bool) -> String {
    let mut directives: Vec<&str> = rust_log
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .into_iter()
        .collect();
    if debug {
        directives.push(DEBUG_DIRECTIVES);
    }

    if directives.is_empty() {
        "off".to_string()
    } else {
        directives.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_is_off_by_default() {
        assert_eq!(filter_directives(None, false), "off");
        assert_eq!(filter_directives(Some("  "), false), "off");
    }

    #[test]
    fn debug_flag_enables_our_crates() {
        assert_eq!(filter_directives(None, true), DEBUG_DIRECTIVES);
    }

    #[test]
    fn debug_flag_extends_rust_log() {
        assert_eq!(filter_directives(Some("warn"), false), "warn");
        assert_eq!(
            filter_directives(Some("warn"), true),
            "warn,weather_cli=debug,weather_core=debug"
        );
    }
}
