//! Random facts via the UselessFacts API
//!
//! [`FactFetcher::fetch`] reports every failure as a [`FetchError`];
//! [`FactFetcher::random_fact`] collapses those failures into the fixed
//! fallback fact, so callers of the tool never see an error.

use crate::error::FetchError;
use crate::models::{FactRequest, FactResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Content used when the service answers without a `text` field
const MISSING_TEXT: &str = "No fact found";

/// Client for the random fact endpoint
#[derive(Debug, Clone)]
pub struct FactFetcher {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl FactFetcher {
    pub fn new<S: Into<String>>(client: Client, base_url: S, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Fetch one fact.
    ///
    /// The category hint is only logged: the provider has no category filter.
    #[instrument(skip(self))]
    pub async fn fetch(&self, request: &FactRequest) -> Result<FactResult, FetchError> {
        info!("Fetching random fact (category hint: {})", request.category_hint());

        let url = format!("{}?language=en", self.base_url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let content = parse_fact_text(&body)?;

        info!("Retrieved fact: {}", content);
        Ok(FactResult::from_api(content, request))
    }

    /// Fetch one fact, substituting the fallback fact on any failure.
    pub async fn random_fact(&self, request: &FactRequest) -> FactResult {
        match self.fetch(request).await {
            Ok(fact) => fact,
            Err(e) => {
                error!("Fact tool error: {}", e);
                FactResult::fallback(request)
            }
        }
    }
}

fn parse_fact_text(body: &str) -> Result<String, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(FetchError::Malformed("expected a JSON object".to_string()));
    };
    Ok(fields
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or(MISSING_TEXT)
        .to_string())
}
