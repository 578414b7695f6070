//! Fact tool request and result models

use serde::{Deserialize, Serialize};

/// Content returned when the facts service fails for any reason
pub const FALLBACK_CONTENT: &str = "Did you know APIs sometimes fail? That's a fact!";
/// Source label for facts served by the facts API
pub const API_SOURCE: &str = "UselessFacts API";
/// Source label for [`FALLBACK_CONTENT`]
pub const FALLBACK_SOURCE: &str = "Fallback fact";

/// A request for a random fact.
///
/// `category` is a free-text hint only. The facts service has no category filter,
/// so the hint is echoed back in the result and never forwarded.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct FactRequest {
    pub category: Option<String>,
}

impl FactRequest {
    #[must_use]
    pub fn with_category<S: Into<String>>(category: S) -> Self {
        Self {
            category: Some(category.into()),
        }
    }

    /// Lowercased hint for logging, `any` when absent
    #[must_use]
    pub fn category_hint(&self) -> String {
        self.category
            .as_deref()
            .map_or_else(|| "any".to_string(), str::to_lowercase)
    }
}

/// A fact together with where it came from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FactResult {
    pub content: String,
    pub category: Option<String>,
    pub source: String,
}

impl FactResult {
    /// A fact served by the facts API
    #[must_use]
    pub fn from_api(content: String, request: &FactRequest) -> Self {
        Self {
            content,
            category: request.category.clone(),
            source: API_SOURCE.to_string(),
        }
    }

    /// The fixed substitute used whenever the facts API fails
    #[must_use]
    pub fn fallback(request: &FactRequest) -> Self {
        Self {
            content: FALLBACK_CONTENT.to_string(),
            category: request.category.clone(),
            source: FALLBACK_SOURCE.to_string(),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == FALLBACK_SOURCE
    }
}
