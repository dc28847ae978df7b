//! Error types for the weather lookup pipeline

use thiserror::Error;

use crate::constants::FALLBACK_ERROR_MESSAGE;

/// Failures of a single city lookup
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The geocoding source returned no match for the city
    #[error("City not found: {city}")]
    NotFound { city: String },

    /// Transport, status or payload failure on either request
    #[error("Network error: {message}")]
    Network { message: String },
}

impl WeatherError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(city: S) -> Self {
        Self::NotFound { city: city.into() }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Message suitable for showing in place of the weather display
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::NotFound { .. } => {
                "City not found. Please try another location.".to_string()
            }
            WeatherError::Network { .. } => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.to_string())
    }
}

impl From<chrono::ParseError> for WeatherError {
    fn from(err: chrono::ParseError) -> Self {
        Self::network(format!("malformed timestamp in forecast payload: {err}"))
    }
}
