use async_trait::async_trait;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use super::{Tool, parse_input};
use crate::geocoding::Geocoder;
use crate::models::WeatherInfo;
use crate::weather::WeatherFetcher;
use crate::Result;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetWeatherInput {
    #[schemars(description = "City and optionally state/country (e.g., 'London, UK')")]
    pub location: String,
}

/// Current weather for a free-text location: geocode, then fetch conditions.
pub struct WeatherTool {
    geocoder: Geocoder,
    fetcher: WeatherFetcher,
    parameter_schema: Value,
}

impl WeatherTool {
    pub fn new(geocoder: Geocoder, fetcher: WeatherFetcher) -> Self {
        Self {
            geocoder,
            fetcher,
            parameter_schema: schema_for!(GetWeatherInput).to_value(),
        }
    }

    /// Geocoding and weather errors are logged and returned unchanged.
    pub async fn weather(&self, input: &GetWeatherInput) -> Result<WeatherInfo> {
        let result = self.lookup(&input.location).await;
        match &result {
            Ok(_) => info!("Weather retrieved for {}", input.location),
            Err(e) => error!("Weather tool error: {}", e),
        }
        result
    }

    async fn lookup(&self, location: &str) -> Result<WeatherInfo> {
        let coordinates = self.geocoder.geocode(location).await?;
        let conditions = self.fetcher.current_conditions(&coordinates).await?;
        Ok(WeatherInfo::now(location, conditions))
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "weather_tool"
    }

    fn description(&self) -> &str {
        "Get current weather using Open-Meteo and Nominatim."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn usage_hint(&self) -> Option<&str> {
        Some("If the user asks about the weather in a specific location, use the 'weather_tool' tool.")
    }

    async fn call(&self, arguments: Value) -> anyhow::Result<Value> {
        let input: GetWeatherInput = parse_input(self.name(), arguments)?;
        let info = self.weather(&input).await?;
        Ok(serde_json::to_value(info)?)
    }
}
