//! Geocoding via the Nominatim search API
//!
//! Resolves a free-text location to the coordinates of the first candidate.

use crate::models::Coordinates;
use crate::{LimerickError, Result};
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

/// Client for a Nominatim-compatible search endpoint
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new<S: Into<String>>(client: Client, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Resolve a location to the coordinates of the best match.
    ///
    /// Fails with [`LimerickError::LocationNotFound`] when the provider has no
    /// candidate. Transport and HTTP failures are returned as-is, never retried.
    #[instrument(skip(self))]
    pub async fn geocode(&self, location: &str) -> Result<Coordinates> {
        if location.trim().is_empty() {
            return Err(LimerickError::validation("Location cannot be empty"));
        }

        info!("Geocoding: {}", location);

        let url = self.search_url(location);
        debug!("Nominatim request URL: {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;

        let candidates: Vec<Coordinates> = response.json().await.map_err(|e| {
            error!("Failed to parse geocoding response for '{}': {}", location, e);
            LimerickError::api(format!("Invalid geocoding data received: {e}"))
        })?;

        let Some(coordinates) = candidates.into_iter().next() else {
            warn!("No results found for location '{}'", location);
            return Err(LimerickError::location_not_found(location));
        };

        info!("Found coordinates: {}", coordinates.format_pair());
        Ok(coordinates)
    }

    fn search_url(&self, location: &str) -> String {
        format!(
            "{}?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(location)
        )
    }
}
