use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};
use weather_core::{ApiError, ConfigError, WeatherRecord, WeatherService};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Get current weather information for a city")]
pub struct Cli {
    /// Name of the city to get weather for.
    pub city: String,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub async fn run(self) -> ExitCode {
        debug!("Starting weather CLI for city: {}", self.city);

        let outcome = tokio::select! {
            res = lookup(&self.city) => res,
            _ = tokio::signal::ctrl_c() => {
                info!("Application interrupted by user");
                eprintln!("\nOperation cancelled by user.");
                return ExitCode::FAILURE;
            }
        };

        match outcome {
            Ok(record) => {
                println!("{record}");
                debug!("Weather data displayed successfully");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{}", failure_message(&err));
                ExitCode::FAILURE
            }
        }
    }
}

async fn lookup(city: &str) -> Result<WeatherRecord> {
    let service = WeatherService::from_env()?;
    Ok(service.get_weather(Some(city)).await?)
}

/// User-facing line for a failed lookup, prefixed by fault kind.
fn failure_message(err: &anyhow::Error) -> String {
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        error!("Configuration error: {config_err}");
        format!("Configuration Error: {config_err}")
    } else if let Some(api_err) = err.downcast_ref::<ApiError>() {
        error!("Weather API error: {api_err}");
        format!("Weather Error: {api_err}")
    } else {
        error!("Unexpected error: {err:#}");
        format!("Unexpected Error: {err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_city_only() {
        let cli = Cli::try_parse_from(["weather", "London"]).unwrap();
        assert_eq!(cli.city, "London");
        assert!(!cli.debug);
    }

    #[test]
    fn parses_debug_flag() {
        let cli = Cli::try_parse_from(["weather", "Paris", "--debug"]).unwrap();
        assert_eq!(cli.city, "Paris");
        assert!(cli.debug);
    }

    #[test]
    fn keeps_spaces_in_city() {
        let cli = Cli::try_parse_from(["weather", "New York"]).unwrap();
        assert_eq!(cli.city, "New York");
    }

    #[test]
    fn city_is_required() {
        assert!(Cli::try_parse_from(["weather"]).is_err());
    }

    #[test]
    fn failure_messages_by_kind() {
        let err = anyhow::Error::from(ConfigError::MissingApiKey);
        assert!(failure_message(&err).starts_with("Configuration Error: API key not found."));

        let err = anyhow::Error::from(ApiError::CityNotFound);
        assert_eq!(
            failure_message(&err),
            "Weather Error: City not found. Please check the city name and try again."
        );

        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(failure_message(&err), "Unexpected Error: disk on fire");
    }

    #[test]
    fn context_does_not_hide_fault_kind() {
        let err = anyhow::Error::from(ConfigError::MissingApiKey).context("while starting up");
        assert!(failure_message(&err).starts_with("Configuration Error:"));
    }
}
