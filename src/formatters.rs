use crate::condition::{ConditionClassification, IconKey};
use crate::controller::QueryState;
use crate::models::ViewModel;

/// Glyph drawn for each icon family
pub fn icon_glyph(icon: IconKey) -> &'static str {
    match icon {
        IconKey::Clear => "\u{2600}\u{fe0f}",
        IconKey::Cloudy => "\u{2601}\u{fe0f}",
        IconKey::Rain => "\u{1f327}\u{fe0f}",
        IconKey::Snow => "\u{2744}\u{fe0f}",
        IconKey::Thunderstorm => "\u{26c8}\u{fe0f}",
    }
}

/// Formats a view model into the fixed weather display layout
pub fn format_view(view: &ViewModel) -> String {
    let mut output = format!(
        "{}\n{}\n\n{} {}\u{00b0}C  {}\nFeels like {}\n\n",
        view.location,
        view.date,
        icon_glyph(view.condition.icon),
        view.temperature,
        view.condition.description,
        view.feels_like
    );

    output.push_str(&format!(
        "Humidity: {}\nWind: {}\nPressure: {}\nUV Index: {}\nVisibility: {}\nDew Point: {}\n\n",
        view.humidity, view.wind_speed, view.pressure, view.uv_index, view.visibility, view.dew_point
    ));

    output.push_str(&format!(
        "Sunrise: {}\nSunset: {}\n",
        view.sunrise, view.sunset
    ));

    if !view.forecast.is_empty() {
        output.push_str("\n5-Day Forecast:\n");
        for card in &view.forecast {
            output.push_str(&format!(
                "  {}  {} {} / {}  {}\n",
                card.day,
                icon_glyph(card.condition.icon),
                card.high,
                card.low,
                card.condition.description
            ));
        }
    }
    output
}

/// Formats whichever state is currently visible
pub fn format_state(state: &QueryState) -> String {
    match state {
        QueryState::Idle => "No search yet. Enter a city name to get the weather.".to_string(),
        QueryState::Loading { city } => format!("Loading weather for {}...", city),
        QueryState::Display(view) => format_view(view),
        QueryState::Error { message } => format!("Error: {}", message),
    }
}

/// Formats a single classification for the code lookup tool
pub fn format_classification(code: i32, condition: &ConditionClassification) -> String {
    format!(
        "WMO code {}: {} (icon: {} {})",
        code,
        condition.description,
        condition.icon.as_str(),
        icon_glyph(condition.icon)
    )
}
