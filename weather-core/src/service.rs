use tracing::{debug, error, info};

use crate::{
    error::ApiError,
    model::WeatherRecord,
    provider::{OpenWeatherMapClient, WeatherProvider},
};

/// Entry point for weather lookups: normalizes the city name and narrows
/// provider failures to [`ApiError`].
#[derive(Debug)]
pub struct WeatherService {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        debug!("WeatherService initialized with {provider:?}");
        Self { provider }
    }

    /// Service backed by [`OpenWeatherMapClient`] configured from the
    /// environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let client = OpenWeatherMapClient::from_env()?;
        Ok(Self::new(Box::new(client)))
    }

    pub async fn get_weather(&self, city: Option<&str>) -> Result<WeatherRecord, ApiError> {
        let city = match city.map(str::trim) {
            Some(city) if !city.is_empty() => city,
            _ => {
                error!("Empty city name provided");
                return Err(ApiError::MissingCity);
            }
        };

        info!("Fetching weather data for city: {city}");

        match self.provider.fetch_weather(city).await {
            Ok(record) => {
                info!("Successfully retrieved weather data for {}", record.city());
                Ok(record)
            }
            Err(err) => match err.downcast::<ApiError>() {
                Ok(api_err) => {
                    error!("Failed to fetch weather data for city: {city}");
                    Err(api_err)
                }
                Err(other) => {
                    error!("Unexpected error while fetching weather data for {city}: {other:#}");
                    Err(ApiError::Unexpected(other.to_string()))
                }
            },
        }
    }
}
