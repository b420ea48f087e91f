//! Error types shared by the weather core.
//!
//! Two fault kinds reach the user: [`ConfigError`] when credentials cannot be
//! resolved, and [`ApiError`] for everything that goes wrong during a lookup
//! (input validation, transport, HTTP status, response decoding).

use thiserror::Error;

use crate::config::API_KEY_VARS;

/// Failure to resolve required configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "API key not found. Please set one of the following environment variables: {} or add it to a .env file.",
        API_KEY_VARS.join(", ")
    )]
    MissingApiKey,
}

/// Failure while looking up weather for a city.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("City name cannot be empty.")]
    EmptyCityName,

    #[error("City name is too long.")]
    CityNameTooLong,

    #[error("City name contains invalid characters.")]
    InvalidCityName,

    /// Raised by the service before any client is involved.
    #[error("City name cannot be null or empty.")]
    MissingCity,

    #[error("Request timeout. Please try again later.")]
    Timeout,

    #[error("Unable to connect to the weather service. Please check your internet connection.")]
    Connect,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API key. Please check your API key configuration.")]
    Unauthorized,

    #[error("City not found. Please check the city name and try again.")]
    CityNotFound,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Weather service is temporarily unavailable. HTTP status: {0}")]
    ServiceUnavailable(u16),

    #[error("API error: Received HTTP status code {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid API response format: missing field {0}")]
    MissingField(&'static str),

    #[error("Invalid API response format: {0}")]
    InvalidResponse(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Map a non-200 HTTP status to the matching error.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::CityNotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServiceUnavailable(status),
            other => Self::UnexpectedStatus(other),
        }
    }

    /// HTTP status behind this error, if it came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::CityNotFound => Some(404),
            Self::RateLimited => Some(429),
            Self::ServiceUnavailable(status) | Self::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

/// A weather record could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("city cannot be empty")]
    EmptyCity,

    #[error("description cannot be empty")]
    EmptyDescription,
}
