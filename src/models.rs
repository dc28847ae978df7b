use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::ConditionClassification;

// ============================================================================
// Open-Meteo Geocoding API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

// ============================================================================
// Open-Meteo Forecast API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: CurrentData,
    pub daily: DailyData,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity: f64,
    pub apparent_temperature: f64,
    pub weather_code: i32,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    pub pressure_msl: f64,
}

/// Parallel arrays indexed by day offset, 0 being today. Open-Meteo
/// reports `null` for values it has no data for, typically on later days.
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default, rename = "temperature_2m_max")]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(default, rename = "temperature_2m_min")]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
    #[serde(default)]
    pub uv_index_max: Vec<Option<f64>>,
}

// ============================================================================
// Domain Models
// ============================================================================

/// Best geocoding match for a searched city
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub country: String,
}

impl Location {
    /// "Name, Country", or just the name when no country was reported
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.display_name.clone()
        } else {
            format!("{}, {}", self.display_name, self.country)
        }
    }
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Self {
            latitude: result.latitude,
            longitude: result.longitude,
            display_name: result.name,
            country: result.country.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub relative_humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub pressure_mb: f64,
    pub weather_code: i32,
}

impl From<&CurrentData> for CurrentConditions {
    fn from(current: &CurrentData) -> Self {
        Self {
            temperature_c: current.temperature,
            apparent_temperature_c: current.apparent_temperature,
            relative_humidity_pct: current.relative_humidity,
            wind_speed_kmh: current.wind_speed,
            pressure_mb: current.pressure_msl,
            weather_code: current.weather_code,
        }
    }
}

/// One day of the daily series; `None` where the source sent `null`
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub weather_code: Option<i32>,
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    pub uv_index_max: Option<f64>,
}

/// One card of the five-day strip
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day: String,
    pub high: String,
    pub low: String,
    pub condition: ConditionClassification,
}

/// Display-ready aggregate handed to rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub location: String,
    pub date: String,
    pub temperature: String,
    pub feels_like: String,
    pub condition: ConditionClassification,
    pub humidity: String,
    pub wind_speed: String,
    pub pressure: String,
    pub uv_index: String,
    /// Placeholder; the forecast endpoint does not supply visibility.
    pub visibility: String,
    /// Estimate only (temperature minus two degrees).
    pub dew_point: String,
    pub sunrise: String,
    pub sunset: String,
    pub forecast: Vec<ForecastCard>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherRequest {
    /// City name, e.g. "London" or "San Francisco"
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ClassifyCodeRequest {
    /// WMO weather interpretation code
    pub code: i32,
}
