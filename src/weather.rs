//! Current weather via the Open-Meteo forecast API

use crate::models::{Coordinates, CurrentConditions, condition_for};
use crate::{LimerickError, Result};
use reqwest::Client;
use tracing::{debug, error, info, instrument};

/// Client for the Open-Meteo forecast endpoint
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    client: Client,
    base_url: String,
}

impl WeatherFetcher {
    pub fn new<S: Into<String>>(client: Client, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the current conditions at the given coordinates.
    ///
    /// Every call re-fetches. A response without a current-weather section fails
    /// with [`LimerickError::WeatherUnavailable`]; an unmapped weather code is not
    /// an error and reads as "Unknown conditions".
    #[instrument(skip(self), fields(lat = %coordinates.latitude, lon = %coordinates.longitude))]
    pub async fn current_conditions(&self, coordinates: &Coordinates) -> Result<CurrentConditions> {
        info!("Fetching weather for: {}", coordinates.format_pair());

        let url = self.forecast_url(coordinates);
        debug!("OpenMeteo API request URL: {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;

        let forecast: openmeteo::ForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to parse weather response: {}", e);
            LimerickError::api(format!("Invalid weather data received: {e}"))
        })?;

        let current = forecast
            .current_weather
            .ok_or(LimerickError::WeatherUnavailable)?;

        Ok(current.into())
    }

    fn forecast_url(&self, coordinates: &Coordinates) -> String {
        format!(
            "{}?latitude={}&longitude={}&current_weather=true",
            self.base_url,
            urlencoding::encode(&coordinates.latitude),
            urlencoding::encode(&coordinates.longitude)
        )
    }
}

/// `OpenMeteo` API response structures
mod openmeteo {
    use super::{CurrentConditions, condition_for};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current_weather: Option<CurrentWeather>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentWeather {
        pub temperature: f64,
        /// Sometimes serialized as a float, e.g. `3.0`
        pub weathercode: Option<f64>,
    }

    impl From<CurrentWeather> for CurrentConditions {
        fn from(current: CurrentWeather) -> Self {
            let code = current.weathercode.map_or(-1, |code| code as i64);
            CurrentConditions {
                temperature: current.temperature,
                condition: condition_for(code).to_string(),
            }
        }
    }
}
