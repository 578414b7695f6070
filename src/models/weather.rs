//! Weather code table and weather result models

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Condition used for any code missing from [`WEATHER_CODES`]
pub const UNKNOWN_CONDITIONS: &str = "Unknown conditions";

/// WMO weather interpretation codes as reported by Open-Meteo
pub static WEATHER_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Freezing drizzle (light)"),
    (57, "Freezing drizzle (dense)"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Freezing rain (light)"),
    (67, "Freezing rain (heavy)"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm (slight/moderate)"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Convert a weather code to a human-readable condition.
///
/// Total over `i64`: unmapped codes yield [`UNKNOWN_CONDITIONS`].
#[must_use]
pub fn condition_for(code: i64) -> &'static str {
    WEATHER_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(UNKNOWN_CONDITIONS, |&(_, condition)| condition)
}

/// Current conditions at a pair of coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Human-readable description of weather conditions
    pub condition: String,
}

/// Result of the weather tool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherInfo {
    /// Location exactly as the user asked for it
    pub location: String,
    pub temperature_celsius: f64,
    pub condition: String,
    /// ISO-8601 UTC timestamp of retrieval
    pub time_retrieved: String,
}

impl WeatherInfo {
    /// Build a result stamped with the current UTC time
    #[must_use]
    pub fn now(location: &str, conditions: CurrentConditions) -> Self {
        Self {
            location: location.to_string(),
            temperature_celsius: conditions.temperature,
            condition: conditions.condition,
            time_retrieved: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_celsius)
    }
}
