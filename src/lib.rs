//! `LimerickBot` - a chat bot that answers in limericks
//!
//! This library provides the weather and random fact tools, the persona and
//! runtime seam for the language model agent, and the conversational loop.

pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod facts;
pub mod geocoding;
pub mod http;
pub mod logging;
pub mod models;
pub mod tools;
pub mod weather;

// Re-export core types for public API
pub use agent::{Agent, AgentRuntime, OpenAiRuntime};
pub use chat::ChatSession;
pub use config::BotConfig;
pub use error::{FetchError, LimerickError};
pub use facts::FactFetcher;
pub use geocoding::Geocoder;
pub use models::{Coordinates, FactRequest, FactResult, WeatherInfo};
pub use tools::{Tool, ToolSet};
pub use weather::WeatherFetcher;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, LimerickError>;
