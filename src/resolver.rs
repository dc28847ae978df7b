//! City name resolution via the Open-Meteo geocoding endpoint

use tracing::{debug, info};

use crate::client::OpenMeteoClient;
use crate::error::WeatherError;
use crate::models::{GeocodingResponse, Location};

impl OpenMeteoClient {
    /// Resolve a city name to the first geocoding match.
    ///
    /// Callers pass trimmed, non-empty text.
    pub async fn resolve(&self, city: &str) -> Result<Location, WeatherError> {
        debug!("Geocoding city name: {}", city);

        let url = format!("{}/search", self.geocoding_base);
        let query = [
            ("name", city),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ];

        let response = self.make_request::<GeocodingResponse, _>(&url, &query).await?;

        // Use the first (best) result
        let location = response
            .results
            .and_then(|results| results.into_iter().next())
            .map(Location::from)
            .ok_or_else(|| WeatherError::not_found(city))?;

        info!(
            "Resolved {} to {} ({:.4}, {:.4})",
            city,
            location.label(),
            location.latitude,
            location.longitude
        );

        Ok(location)
    }
}
