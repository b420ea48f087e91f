use std::fmt::Debug;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::{WeatherRecord, error::ApiError};

pub mod openweather;

pub use openweather::OpenWeatherMapClient;

/// Longest city name accepted, in characters.
pub const MAX_CITY_NAME_LEN: usize = 100;

// Word characters are Unicode-aware, so "São Paulo" and "Zürich" pass.
static CITY_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s\-.]+$").expect("city name pattern is valid"));

/// Something that can look up current weather for a city.
///
/// Implementors should report lookup failures as [`ApiError`]; anything else
/// is treated as unexpected by [`crate::WeatherService`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> anyhow::Result<WeatherRecord>;
}

/// Check that `city` is non-blank, at most [`MAX_CITY_NAME_LEN`] characters
/// once trimmed, and made of word characters, whitespace, hyphens or periods.
pub fn validate_city_name(city: Option<&str>) -> Result<(), ApiError> {
    let city = city.map(str::trim).unwrap_or_default();

    if city.is_empty() {
        return Err(ApiError::EmptyCityName);
    }
    if city.chars().count() > MAX_CITY_NAME_LEN {
        return Err(ApiError::CityNameTooLong);
    }
    if !CITY_NAME_PATTERN.is_match(city) {
        return Err(ApiError::InvalidCityName);
    }

    Ok(())
}
