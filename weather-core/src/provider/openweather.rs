use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error};

use crate::{
    config::Config,
    error::ApiError,
    model::{WeatherRecord, title_case},
    provider::validate_city_name,
};

use super::WeatherProvider;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the OpenWeatherMap "current weather" endpoint.
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(config: Config, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: config.api_key,
            base_url: config.base_url,
            http,
        })
    }

    /// Client configured from the environment; fails with
    /// [`crate::ConfigError`] when no API key is set.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Self::new(config)
    }

    pub fn build_request_url(&self, city: &str) -> String {
        format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(city.trim()),
            self.api_key,
        )
    }

    /// Copy of `text` safe for logs: every occurrence of the API key is
    /// replaced by `REDACTED`.
    pub fn redact_key(&self, text: &str) -> String {
        text.replace(&self.api_key, "REDACTED")
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, ApiError> {
        validate_city_name(Some(city))?;

        let url = self.build_request_url(city);
        debug!("Making API request to: {}", self.redact_key(&url));

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        debug!("API response status code: {}", status.as_u16());

        let body = res.text().await.map_err(|e| self.transport_error(e))?;

        if status != StatusCode::OK {
            debug!(
                "API error - Status code: {}, Response: {}",
                status.as_u16(),
                truncate_body(&body),
            );
            return Err(ApiError::from_status(status.as_u16()));
        }

        parse_weather_response(&body)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            error!("Request timeout occurred");
            ApiError::Timeout
        } else if err.is_connect() {
            error!("Connection error occurred");
            ApiError::Connect
        } else {
            // reqwest includes the request URL in its message, and the URL carries the key.
            let detail = self.redact_key(&error_chain(&err.without_url()));
            error!("Request error occurred: {detail}");
            ApiError::Network(detail)
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord> {
        Ok(self.fetch_current(city).await?)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    main: Option<OwMain>,
    weather: Option<Vec<OwWeather>>,
}

/// Turn a current-weather JSON body into a [`WeatherRecord`], title-casing
/// the description.
pub fn parse_weather_response(body: &str) -> Result<WeatherRecord, ApiError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|e| {
        error!("Invalid data in API response: {e}");
        ApiError::InvalidResponse(e.to_string())
    })?;

    let city = parsed.name.ok_or_else(|| missing("name"))?;
    let temperature = parsed
        .main
        .ok_or_else(|| missing("main"))?
        .temp
        .ok_or_else(|| missing("main.temp"))?;
    let description = parsed
        .weather
        .ok_or_else(|| missing("weather"))?
        .into_iter()
        .next()
        .ok_or_else(|| missing("weather[0]"))?
        .description
        .ok_or_else(|| missing("weather[0].description"))?;

    let record = WeatherRecord::new(city, temperature, title_case(&description))
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    debug!("Successfully parsed weather data for {}", record.city());
    Ok(record)
}

fn missing(field: &'static str) -> ApiError {
    error!("Missing required field in API response: {field}");
    ApiError::MissingField(field)
}

/// `err` followed by each of its sources, joined with `": "`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
