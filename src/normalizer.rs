//! Forecast retrieval and normalization into a display-ready view model.
//!
//! Two values are approximations on purpose: the dew point is the current
//! temperature minus two degrees, and visibility is a fixed placeholder
//! because the forecast endpoint does not report it.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::client::OpenMeteoClient;
use crate::condition::classify;
use crate::constants::{CURRENT_FIELDS, DAILY_FIELDS, FORECAST_DAYS, VISIBILITY_PLACEHOLDER};
use crate::error::WeatherError;
use crate::models::{
    CurrentConditions, DailyData, DailyForecastEntry, ForecastCard, ForecastResponse, Location,
    ViewModel,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Offset subtracted from the temperature to estimate the dew point
const DEW_POINT_OFFSET_C: f64 = 2.0;

impl OpenMeteoClient {
    /// Fetch current conditions plus the six-day daily series for a location
    /// and map them into a view model.
    pub async fn fetch_and_normalize(&self, location: &Location) -> Result<ViewModel, WeatherError> {
        info!(
            "Fetching forecast for {} ({:.4}, {:.4})",
            location.label(),
            location.latitude,
            location.longitude
        );

        let url = format!("{}/forecast", self.forecast_base);
        let forecast_days = FORECAST_DAYS.to_string();
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let query = [
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", CURRENT_FIELDS),
            ("daily", DAILY_FIELDS),
            ("forecast_days", forecast_days.as_str()),
            ("timezone", "auto"),
        ];

        let response = self.make_request::<ForecastResponse, _>(&url, &query).await?;
        let current = CurrentConditions::from(&response.current);
        let daily = parse_daily(&response.daily)?;
        debug!("Received {} daily entries", daily.len());

        normalize(location, &current, &daily)
    }
}

/// Zips the parallel daily arrays into entries, rejecting ragged series.
/// `null` values are kept as `None`; `normalize` decides which ones matter.
pub fn parse_daily(daily: &DailyData) -> Result<Vec<DailyForecastEntry>, WeatherError> {
    let len = daily.time.len();
    let lengths = [
        daily.weather_code.len(),
        daily.temperature_max.len(),
        daily.temperature_min.len(),
        daily.sunrise.len(),
        daily.sunset.len(),
        daily.uv_index_max.len(),
    ];
    if lengths.iter().any(|&l| l != len) {
        return Err(WeatherError::network(format!(
            "daily series arrays differ in length: time has {len}, others {lengths:?}"
        )));
    }

    (0..len)
        .map(|i| -> Result<DailyForecastEntry, WeatherError> {
            Ok(DailyForecastEntry {
                date: NaiveDate::parse_from_str(&daily.time[i], DATE_FORMAT)?,
                weather_code: daily.weather_code[i],
                temp_max_c: daily.temperature_max[i],
                temp_min_c: daily.temperature_min[i],
                sunrise: daily.sunrise[i].as_deref().map(parse_local_timestamp).transpose()?,
                sunset: daily.sunset[i].as_deref().map(parse_local_timestamp).transpose()?,
                uv_index_max: daily.uv_index_max[i],
            })
        })
        .collect()
}

/// Builds the view model. `daily[0]` is today; the forecast strip holds
/// at most the next five days and never today.
///
/// Today's sunrise, sunset and UV index are shown, so a missing one fails
/// the lookup. A later day missing its code or temperatures loses its card.
pub fn normalize(
    location: &Location,
    current: &CurrentConditions,
    daily: &[DailyForecastEntry],
) -> Result<ViewModel, WeatherError> {
    let (today, ahead) = daily
        .split_first()
        .ok_or_else(|| WeatherError::network("forecast payload has no entry for today"))?;

    let sunrise = today.sunrise.ok_or_else(|| missing_today("sunrise"))?;
    let sunset = today.sunset.ok_or_else(|| missing_today("sunset"))?;
    let uv_index = today.uv_index_max.ok_or_else(|| missing_today("uv_index_max"))?;

    let forecast = ahead
        .iter()
        .take(FORECAST_DAYS - 1)
        .filter_map(|day| {
            let card = forecast_card(day);
            if card.is_none() {
                debug!("Dropping forecast card for {}: incomplete data", day.date);
            }
            card
        })
        .collect();

    Ok(ViewModel {
        location: location.label(),
        date: format_full_date(today.date),
        temperature: round_half_up(current.temperature_c).to_string(),
        feels_like: format!("{}°C", round_half_up(current.apparent_temperature_c)),
        condition: classify(current.weather_code),
        humidity: format!("{}%", round_half_up(current.relative_humidity_pct)),
        wind_speed: format!("{} km/h", round_half_up(current.wind_speed_kmh)),
        pressure: format!("{} mb", round_half_up(current.pressure_mb)),
        uv_index: round_half_up(uv_index).to_string(),
        visibility: VISIBILITY_PLACEHOLDER.to_string(),
        dew_point: format!(
            "{}°C",
            round_half_up(current.temperature_c - DEW_POINT_OFFSET_C)
        ),
        sunrise: format_clock_time(sunrise),
        sunset: format_clock_time(sunset),
        forecast,
    })
}

fn forecast_card(day: &DailyForecastEntry) -> Option<ForecastCard> {
    Some(ForecastCard {
        day: format_day_name(day.date),
        high: format!("{}°", round_half_up(day.temp_max_c?)),
        low: format!("{}°", round_half_up(day.temp_min_c?)),
        condition: classify(day.weather_code?),
    })
}

fn missing_today(field: &str) -> WeatherError {
    WeatherError::network(format!("forecast payload has no {field} for today"))
}

/// Rounds to the nearest integer, ties toward positive infinity
/// (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// "Monday, January 1, 2024"
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "6:15 AM"
pub fn format_clock_time(time: NaiveDateTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// "Tue"
pub fn format_day_name(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Parses an ISO local timestamp as delivered with `timezone=auto`, with or
/// without seconds.
fn parse_local_timestamp(value: &str) -> Result<NaiveDateTime, WeatherError> {
    let mut last_err = None;
    for format in TIMESTAMP_FORMATS {
        match NaiveDateTime::parse_from_str(value, format) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => last_err = Some(e),
        }
    }
    Err(match last_err {
        Some(e) => e.into(),
        None => WeatherError::network(format!("unparseable timestamp: {value}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::IconKey;

    fn london() -> Location {
        Location {
            latitude: 51.50853,
            longitude: -0.12574,
            display_name: "London".to_string(),
            country: "United Kingdom".to_string(),
        }
    }

    fn fixed_current() -> CurrentConditions {
        CurrentConditions {
            temperature_c: 15.6,
            apparent_temperature_c: 14.2,
            relative_humidity_pct: 80.0,
            wind_speed_kmh: 12.4,
            pressure_mb: 1013.2,
            weather_code: 2,
        }
    }

    fn present<T: Copy>(values: &[T]) -> Vec<Option<T>> {
        values.iter().copied().map(Some).collect()
    }

    fn six_day_series() -> DailyData {
        DailyData {
            time: (1..=6).map(|d| format!("2024-01-0{d}")).collect(),
            weather_code: present(&[2, 0, 61, 73, 95, 45]),
            temperature_max: present(&[17.2, 18.4, 12.5, 3.1, 20.0, 9.6]),
            temperature_min: present(&[8.9, 9.2, 6.4, -2.5, 14.5, 1.0]),
            sunrise: (1..=6).map(|d| Some(format!("2024-01-0{d}T06:15"))).collect(),
            sunset: (1..=6).map(|d| Some(format!("2024-01-0{d}T18:42"))).collect(),
            uv_index_max: present(&[3.45, 4.0, 1.2, 0.5, 6.6, 2.0]),
        }
    }

    fn six_days() -> Vec<DailyForecastEntry> {
        parse_daily(&six_day_series()).unwrap()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(15.6), 16);
        assert_eq!(round_half_up(14.2), 14);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_normalize_fixed_current_payload() {
        let view = normalize(&london(), &fixed_current(), &six_days()).unwrap();

        assert_eq!(view.location, "London, United Kingdom");
        assert_eq!(view.temperature, "16");
        assert_eq!(view.feels_like, "14°C");
        assert_eq!(view.humidity, "80%");
        assert_eq!(view.wind_speed, "12 km/h");
        assert_eq!(view.pressure, "1013 mb");
        assert_eq!(view.condition.description, "Partly Cloudy");
        assert_eq!(view.condition.icon, IconKey::Cloudy);
    }

    #[test]
    fn test_normalize_today_fields() {
        let view = normalize(&london(), &fixed_current(), &six_days()).unwrap();

        assert_eq!(view.date, "Monday, January 1, 2024");
        assert_eq!(view.sunrise, "6:15 AM");
        assert_eq!(view.sunset, "6:42 PM");
        assert_eq!(view.uv_index, "3");
    }

    #[test]
    fn test_approximations_are_kept() {
        let view = normalize(&london(), &fixed_current(), &six_days()).unwrap();

        // 15.6 - 2 = 13.6
        assert_eq!(view.dew_point, "14°C");
        assert_eq!(view.visibility, "10 km");
    }

    #[test]
    fn test_forecast_skips_today() {
        let view = normalize(&london(), &fixed_current(), &six_days()).unwrap();

        assert_eq!(view.forecast.len(), 5);
        let days: Vec<&str> = view.forecast.iter().map(|c| c.day.as_str()).collect();
        assert_eq!(days, ["Tue", "Wed", "Thu", "Fri", "Sat"]);

        let first = &view.forecast[0];
        assert_eq!(first.high, "18°");
        assert_eq!(first.low, "9°");
        assert_eq!(first.condition.description, "Clear Sky");

        let cold = &view.forecast[2];
        assert_eq!(cold.low, "-2°");
        assert_eq!(cold.condition.description, "Snowy");

        assert_eq!(view.forecast[3].condition.icon, IconKey::Thunderstorm);
    }

    #[test]
    fn test_forecast_capped_at_five_cards() {
        let mut series = six_day_series();
        series.time.push("2024-01-07".to_string());
        series.weather_code.push(Some(0));
        series.temperature_max.push(Some(10.0));
        series.temperature_min.push(Some(5.0));
        series.sunrise.push(Some("2024-01-07T06:15".to_string()));
        series.sunset.push(Some("2024-01-07T18:42".to_string()));
        series.uv_index_max.push(Some(1.0));

        let days = parse_daily(&series).unwrap();
        let view = normalize(&london(), &fixed_current(), &days).unwrap();
        assert_eq!(view.forecast.len(), 5);
        assert_eq!(view.forecast[4].day, "Sat");
    }

    #[test]
    fn test_short_series_yields_fewer_cards() {
        let days = six_days();
        let view = normalize(&london(), &fixed_current(), &days[..3]).unwrap();
        assert_eq!(view.forecast.len(), 2);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let err = normalize(&london(), &fixed_current(), &[]).unwrap_err();
        assert!(matches!(err, WeatherError::Network { .. }));
    }

    #[test]
    fn test_ragged_series_is_an_error() {
        let mut series = six_day_series();
        series.uv_index_max.pop();
        let err = parse_daily(&series).unwrap_err();
        assert!(err.to_string().contains("differ in length"));
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let mut series = six_day_series();
        series.sunrise[0] = Some("sometime in the morning".to_string());
        let err = parse_daily(&series).unwrap_err();
        assert!(matches!(err, WeatherError::Network { .. }));
    }

    #[test]
    fn test_null_in_undisplayed_slot_is_tolerated() {
        let mut series = six_day_series();
        series.uv_index_max[5] = None;
        series.sunrise[3] = None;
        series.sunset[4] = None;

        let days = parse_daily(&series).unwrap();
        let view = normalize(&london(), &fixed_current(), &days).unwrap();
        assert_eq!(view.forecast.len(), 5);
        assert_eq!(view.uv_index, "3");
    }

    #[test]
    fn test_incomplete_day_drops_its_card() {
        let mut series = six_day_series();
        series.temperature_max[2] = None;
        series.weather_code[4] = None;

        let days = parse_daily(&series).unwrap();
        let view = normalize(&london(), &fixed_current(), &days).unwrap();
        let days: Vec<&str> = view.forecast.iter().map(|c| c.day.as_str()).collect();
        assert_eq!(days, ["Tue", "Thu", "Sat"]);
    }

    #[test]
    fn test_missing_value_for_today_is_an_error() {
        let clears: [fn(&mut DailyData); 3] = [
            |s| s.sunrise[0] = None,
            |s| s.sunset[0] = None,
            |s| s.uv_index_max[0] = None,
        ];
        for clear in clears {
            let mut series = six_day_series();
            clear(&mut series);
            let days = parse_daily(&series).unwrap();
            let err = normalize(&london(), &fixed_current(), &days).unwrap_err();
            assert!(err.to_string().contains("for today"), "{err}");
        }
    }

    #[test]
    fn test_clock_time_formatting() {
        let morning = NaiveDateTime::parse_from_str("2024-06-21T06:15", "%Y-%m-%dT%H:%M").unwrap();
        assert_eq!(format_clock_time(morning), "6:15 AM");

        let noon = NaiveDateTime::parse_from_str("2024-06-21T12:05", "%Y-%m-%dT%H:%M").unwrap();
        assert_eq!(format_clock_time(noon), "12:05 PM");

        let midnight = NaiveDateTime::parse_from_str("2024-06-21T00:30", "%Y-%m-%dT%H:%M").unwrap();
        assert_eq!(format_clock_time(midnight), "12:30 AM");
    }

    #[test]
    fn test_timestamp_with_seconds() {
        let parsed = parse_local_timestamp("2024-06-21T21:04:30").unwrap();
        assert_eq!(format_clock_time(parsed), "9:04 PM");
    }
}
