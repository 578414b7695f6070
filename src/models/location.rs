//! Location model for geographic coordinates

use serde::{Deserialize, Serialize};

/// Coordinates as returned by the geocoder.
///
/// Both values are kept as the decimal-degree strings the provider sent, so they
/// are forwarded to the forecast service without any float round-trip.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: String,
    /// Longitude in decimal degrees
    #[serde(rename = "lon")]
    pub longitude: String,
}

impl Coordinates {
    /// Create new coordinates
    #[must_use]
    pub fn new<S: Into<String>>(latitude: S, longitude: S) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Format as "(lat, lon)"
    #[must_use]
    pub fn format_pair(&self) -> String {
        format!("({}, {})", self.latitude, self.longitude)
    }
}
