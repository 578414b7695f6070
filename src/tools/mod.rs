//! Tool adapters exposed to the agent runtime
//!
//! Each tool pairs a typed input (whose JSON Schema is generated with
//! `schemars`) with a plain JSON object result the runtime can fold into its
//! next generation step.

mod fact;
mod weather;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use fact::{RandomFactInput, RandomFactTool};
pub use weather::{GetWeatherInput, WeatherTool};

use crate::config::ServicesConfig;
use crate::facts::FactFetcher;
use crate::geocoding::Geocoder;
use crate::weather::WeatherFetcher;

/// Errors raised while dispatching a tool call
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid input for {tool}: {reason}")]
    InvalidInput { tool: String, reason: String },
}

/// A named, schema-described callable the agent runtime may invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str;

    /// Returns the JSON Schema of the tool's arguments.
    fn parameter_schema(&self) -> &Value;

    /// When the model should reach for this tool, one rule per line.
    fn usage_hint(&self) -> Option<&str> {
        None
    }

    /// Invokes the tool with raw JSON arguments.
    async fn call(&self, arguments: Value) -> anyhow::Result<Value>;
}

/// Plain description of a tool, used for prompts and model requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

/// Ordered set of tools available to one agent
#[derive(Default)]
pub struct ToolSet {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool, builder style.
    #[must_use]
    pub fn with_tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    #[must_use]
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameter_schema().clone(),
                usage: tool.usage_hint().map(str::to_string),
            })
            .collect()
    }

    /// Dispatches a call by tool name.
    pub async fn call(&self, name: &str, arguments: Value) -> anyhow::Result<Value> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.call(arguments).await
    }
}

/// The weather and random fact tools, wired to the configured services
#[must_use]
pub fn standard_tools(client: &reqwest::Client, services: &ServicesConfig) -> ToolSet {
    let geocoder = Geocoder::new(client.clone(), services.geocoding_url.clone());
    let weather = WeatherFetcher::new(client.clone(), services.forecast_url.clone());
    let facts = FactFetcher::new(
        client.clone(),
        services.facts_url.clone(),
        services.fact_timeout(),
    );

    ToolSet::new()
        .with_tool(WeatherTool::new(geocoder, weather))
        .with_tool(RandomFactTool::new(facts))
}

/// Deserializes tool arguments into the tool's typed input.
///
/// A `null` argument is read as an empty object so tools with only optional
/// fields accept a bare call.
fn parse_input<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|err| ToolError::InvalidInput {
        tool: tool.to_string(),
        reason: err.to_string(),
    })
}
