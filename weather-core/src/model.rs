use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ValidationError;

/// Current conditions for a city, as returned by a successful lookup.
#[derive(Debug, Clone)]
pub struct WeatherRecord {
    city: String,
    temperature_celsius: f64,
    description: String,
}

impl WeatherRecord {
    /// Build a record; `city` and `description` must not be blank.
    ///
    /// Values are stored as given (no trimming, no case changes).
    pub fn new(
        city: impl Into<String>,
        temperature_celsius: impl Into<f64>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let city = city.into();
        let description = description.into();

        if city.trim().is_empty() {
            return Err(ValidationError::EmptyCity);
        }
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        Ok(Self {
            city,
            temperature_celsius: temperature_celsius.into(),
            description,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    // -0.0 and 0.0 compare equal, so they must hash the same.
    fn temperature_bits(&self) -> u64 {
        if self.temperature_celsius == 0.0 {
            0.0f64.to_bits()
        } else {
            self.temperature_celsius.to_bits()
        }
    }
}

impl PartialEq for WeatherRecord {
    fn eq(&self, other: &Self) -> bool {
        self.city == other.city
            && self.temperature_bits() == other.temperature_bits()
            && self.description == other.description
    }
}

impl Eq for WeatherRecord {}

impl Hash for WeatherRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.city.hash(state);
        self.temperature_bits().hash(state);
        self.description.hash(state);
    }
}

impl fmt::Display for WeatherRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weather for {}:\nTemperature: {:.1}°C\nConditions: {}",
            self.city, self.temperature_celsius, self.description
        )
    }
}

/// Capitalize the first letter of every word and lower-case the rest.
///
/// A word starts at any cased letter not preceded by another cased
/// character, so `"o'neil"` becomes `"O'Neil"`. Uncased characters such as
/// CJK ideographs pass through and also end a word.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_cased = false;

    for ch in text.chars() {
        let is_cased = ch.is_uppercase() || ch.is_lowercase();
        if !is_cased {
            out.push(ch);
        } else if prev_is_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_is_cased = is_cased;
    }

    out
}
