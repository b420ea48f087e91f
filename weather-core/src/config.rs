use tracing::debug;

use crate::error::ConfigError;

/// Environment variables accepted for the API key, in priority order.
pub const API_KEY_VARS: [&str; 3] = [
    "OPENWEATHERMAP_API_KEY",
    "OPEN_WEATHER_API_KEY",
    "OPENWEATHER_API_KEY",
];

/// Environment variable overriding the provider base URL.
pub const API_URL_VAR: &str = "OPENWEATHERMAP_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Resolved settings for talking to OpenWeatherMap.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

// The key must never end up in logs, so Debug is written by hand.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"REDACTED")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Resolve configuration from the process environment, after loading a
    /// local `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: api_key()?,
            base_url: api_base_url(),
        })
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_key: resolve_api_key(&lookup)?,
            base_url: resolve_base_url(&lookup),
        })
    }
}

/// API key from the process environment (or `.env`).
pub fn api_key() -> Result<String, ConfigError> {
    load_dotenv();
    resolve_api_key(env_lookup)
}

/// Base URL from the process environment (or `.env`), falling back to
/// [`DEFAULT_API_BASE_URL`].
pub fn api_base_url() -> String {
    load_dotenv();
    resolve_base_url(env_lookup)
}

/// First non-blank value among [`API_KEY_VARS`], trimmed.
pub fn resolve_api_key<F>(lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for name in API_KEY_VARS {
        if let Some(value) = non_blank(lookup(name)) {
            debug!("API key loaded from {name}");
            return Ok(value);
        }
    }

    Err(ConfigError::MissingApiKey)
}

pub fn resolve_base_url<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match non_blank(lookup(API_URL_VAR)) {
        Some(url) => {
            debug!("Using API base URL from environment: {url}");
            url
        }
        None => {
            debug!("Using default API base URL: {DEFAULT_API_BASE_URL}");
            DEFAULT_API_BASE_URL.to_string()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Variables already present in the environment win over `.env` entries.
fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn api_key_from_primary_variable() {
        let key = resolve_api_key(lookup_from(&[("OPENWEATHERMAP_API_KEY", "primary")])).unwrap();
        assert_eq!(key, "primary");
    }

    #[test]
    fn api_key_is_trimmed() {
        let key =
            resolve_api_key(lookup_from(&[("OPENWEATHERMAP_API_KEY", "  test_api_key_456  ")]))
                .unwrap();
        assert_eq!(key, "test_api_key_456");
    }

    #[test]
    fn api_key_priority_order() {
        let lookup = lookup_from(&[
            ("OPENWEATHER_API_KEY", "third"),
            ("OPEN_WEATHER_API_KEY", "second"),
        ]);
        assert_eq!(resolve_api_key(lookup).unwrap(), "second");

        let lookup = lookup_from(&[
            ("OPENWEATHER_API_KEY", "third"),
            ("OPEN_WEATHER_API_KEY", "second"),
            ("OPENWEATHERMAP_API_KEY", "first"),
        ]);
        assert_eq!(resolve_api_key(lookup).unwrap(), "first");
    }

    #[test]
    fn blank_primary_falls_through_to_alias() {
        let lookup = lookup_from(&[("OPENWEATHERMAP_API_KEY", "   "), ("OPENWEATHER_API_KEY", "alias")]);
        assert_eq!(resolve_api_key(lookup).unwrap(), "alias");
    }

    #[test]
    fn api_key_missing_everywhere() {
        let err = resolve_api_key(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
        for name in API_KEY_VARS {
            assert!(err.to_string().contains(name));
        }
    }

    #[test]
    fn api_key_whitespace_only_everywhere() {
        let lookup = lookup_from(&[
            ("OPENWEATHERMAP_API_KEY", ""),
            ("OPEN_WEATHER_API_KEY", "  "),
            ("OPENWEATHER_API_KEY", "\t\n"),
        ]);
        assert!(resolve_api_key(lookup).is_err());
    }

    #[test]
    fn base_url_override_is_trimmed() {
        let url = resolve_base_url(lookup_from(&[(API_URL_VAR, "  https://test.api.com  ")]));
        assert_eq!(url, "https://test.api.com");
    }

    #[test]
    fn base_url_defaults_when_missing_or_blank() {
        assert_eq!(resolve_base_url(lookup_from(&[])), DEFAULT_API_BASE_URL);
        assert_eq!(resolve_base_url(lookup_from(&[(API_URL_VAR, "   ")])), DEFAULT_API_BASE_URL);
        assert_eq!(DEFAULT_API_BASE_URL, "https://api.openweathermap.org/data/2.5");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let cfg = Config::from_lookup(lookup_from(&[("OPENWEATHERMAP_API_KEY", "secret-key")])).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains(DEFAULT_API_BASE_URL));
    }
}
