/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-city-weather/0.1.0";

/// Open-Meteo geocoding API base URL
pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Open-Meteo forecast API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// City searched when the server starts
pub const DEFAULT_CITY: &str = "London";

/// Instantaneous fields requested from the forecast endpoint
pub const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,pressure_msl";

/// Daily series requested from the forecast endpoint
pub const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,uv_index_max";

/// Today plus five days ahead
pub const FORECAST_DAYS: usize = 6;

/// The forecast endpoint does not report visibility.
pub const VISIBILITY_PLACEHOLDER: &str = "10 km";

/// Shown when a failure carries no user-facing detail
pub const FALLBACK_ERROR_MESSAGE: &str = "Unable to fetch weather data. Please try again.";
