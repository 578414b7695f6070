use async_trait::async_trait;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, parse_input};
use crate::facts::FactFetcher;
use crate::models::FactRequest;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct RandomFactInput {
    #[schemars(description = "Optional category for fact (e.g., 'science', 'history', 'animal')")]
    #[serde(default)]
    pub category: Option<String>,
}

/// A random fact. Never fails: service errors yield the fallback fact.
pub struct RandomFactTool {
    fetcher: FactFetcher,
    parameter_schema: Value,
}

impl RandomFactTool {
    pub fn new(fetcher: FactFetcher) -> Self {
        Self {
            fetcher,
            parameter_schema: schema_for!(RandomFactInput).to_value(),
        }
    }
}

#[async_trait]
impl Tool for RandomFactTool {
    fn name(&self) -> &str {
        "random_fact_tool"
    }

    fn description(&self) -> &str {
        "Get a random interesting fact from a public API."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn usage_hint(&self) -> Option<&str> {
        Some(
            "If the user asks for a fact or trivia, use the 'random_fact_tool' tool.\n\
             You can specify a category as a hint, but all facts come from the same source.",
        )
    }

    async fn call(&self, arguments: Value) -> anyhow::Result<Value> {
        let input: RandomFactInput = parse_input(self.name(), arguments)?;
        let request = FactRequest {
            category: input.category,
        };
        let fact = self.fetcher.random_fact(&request).await;
        Ok(serde_json::to_value(fact)?)
    }
}
