//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Environment-based configuration (API key, base URL)
//! - The [`WeatherProvider`] abstraction and its OpenWeatherMap client
//! - The [`WeatherService`] façade used by the binary
//! - The [`WeatherRecord`] value and the error types surfaced to users
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::Config;
pub use error::{ApiError, ConfigError, ValidationError};
pub use model::WeatherRecord;
pub use provider::{OpenWeatherMapClient, WeatherProvider};
pub use service::WeatherService;
