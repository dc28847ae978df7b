use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::constants::{GEOCODING_API_BASE, OPEN_METEO_API_BASE, USER_AGENT};
use crate::error::WeatherError;
use crate::models::ViewModel;

/// HTTP client for the Open-Meteo geocoding and forecast endpoints
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Arc<Client>,
    pub(crate) geocoding_base: String,
    pub(crate) forecast_base: String,
}

impl OpenMeteoClient {
    /// Creates a client against the public Open-Meteo endpoints
    pub fn new() -> Result<Self> {
        Self::with_base_urls(GEOCODING_API_BASE, OPEN_METEO_API_BASE)
    }

    /// Creates a client against custom base URLs (used by tests)
    pub fn with_base_urls(geocoding_base: &str, forecast_base: &str) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            geocoding_base: geocoding_base.trim_end_matches('/').to_string(),
            forecast_base: forecast_base.trim_end_matches('/').to_string(),
        })
    }

    /// Makes an HTTP GET request with query parameters and deserializes the JSON response
    pub(crate) async fn make_request<T, Q>(&self, url: &str, query: &Q) -> Result<T, WeatherError>
    where
        T: for<'de> Deserialize<'de>,
        Q: serde::Serialize + ?Sized,
    {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(WeatherError::network(format!(
                "Request failed with status: {}",
                response.status()
            )));
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Full pipeline: city name to display-ready view model
    pub async fn lookup(&self, city: &str) -> Result<ViewModel, WeatherError> {
        let location = self.resolve(city).await?;
        self.fetch_and_normalize(&location).await
    }
}
