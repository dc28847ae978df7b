//! WMO weather code classification.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

/// Icon family a condition is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKey {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
}

impl IconKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionClassification {
    pub description: &'static str,
    pub icon: IconKey,
}

impl ConditionClassification {
    const fn new(description: &'static str, icon: IconKey) -> Self {
        Self { description, icon }
    }
}

/// Classifies a WMO weather code.
///
/// Bounds are cumulative and inclusive, evaluated top to bottom, so the
/// order of the arms matters: a code is owned by the first bound it fits.
/// Anything above 99 is reported as unknown with a cloudy icon.
pub fn classify(code: i32) -> ConditionClassification {
    use IconKey::*;

    match code {
        0 => ConditionClassification::new("Clear Sky", Clear),
        c if c <= 3 => ConditionClassification::new("Partly Cloudy", Cloudy),
        c if c <= 48 => ConditionClassification::new("Foggy", Cloudy),
        c if c <= 67 => ConditionClassification::new("Rainy", Rain),
        c if c <= 77 => ConditionClassification::new("Snowy", Snow),
        c if c <= 82 => ConditionClassification::new("Rain Showers", Rain),
        c if c <= 86 => ConditionClassification::new("Snow Showers", Snow),
        c if c <= 99 => ConditionClassification::new("Thunderstorm", Thunderstorm),
        _ => ConditionClassification::new("Unknown", Cloudy),
    }
}
