//! Configuration management for LimerickBot
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and provides validation for all configuration settings. The loaded value is
//! immutable and handed to constructors; nothing reads process state afterwards.

use crate::LimerickError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for LimerickBot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Language model endpoint used by the agent runtime
    pub model: ModelConfig,
    /// Public data services used by the tools
    pub services: ServicesConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// OpenAI-compatible model endpoint settings
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier sent with every request
    pub name: String,
    /// Base URL of the chat-completions API, without the endpoint path
    pub base_url: String,
    /// Bearer token for the endpoint
    pub api_key: String,
    /// Maximum number of model calls per user turn
    pub max_turns: u32,
}

/// Public data service endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServicesConfig {
    /// Geocoding search endpoint (Nominatim)
    pub geocoding_url: String,
    /// Forecast endpoint (Open-Meteo)
    pub forecast_url: String,
    /// Random fact endpoint (UselessFacts)
    pub facts_url: String,
    /// User agent sent with every service request
    pub user_agent: String,
    /// Timeout for the facts request in seconds
    pub fact_timeout_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_model_name() -> String {
    "qwen3-4b-thinking-2507".to_string()
}

fn default_model_base_url() -> String {
    "http://localhost:1234/v1".to_string()
}

fn default_model_api_key() -> String {
    "lm-studio".to_string()
}

fn default_max_turns() -> u32 {
    10
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_facts_url() -> String {
    "https://uselessfacts.jsph.pl/api/v2/facts/random".to_string()
}

fn default_user_agent() -> String {
    "weather-agent/1.0".to_string()
}

fn default_fact_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            base_url: default_model_base_url(),
            api_key: default_model_api_key(),
            max_turns: default_max_turns(),
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("max_turns", &self.max_turns)
            .finish()
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            facts_url: default_facts_url(),
            user_agent: default_user_agent(),
            fact_timeout_seconds: default_fact_timeout(),
        }
    }
}

impl ServicesConfig {
    /// Timeout applied to the facts request
    #[must_use]
    pub fn fact_timeout(&self) -> Duration {
        Duration::from_secs(self.fact_timeout_seconds)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl BotConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. LIMERICK_MODEL__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("LIMERICK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: BotConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("limerick-bot").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.model.base_url.is_empty() {
            self.model.base_url = default_model_base_url();
        }
        if self.model.max_turns == 0 {
            self.model.max_turns = default_max_turns();
        }
        if self.services.user_agent.is_empty() {
            self.services.user_agent = default_user_agent();
        }
        if self.services.fact_timeout_seconds == 0 {
            self.services.fact_timeout_seconds = default_fact_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_model()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_model(&self) -> Result<()> {
        if self.model.name.trim().is_empty() {
            return Err(LimerickError::config("Model name cannot be empty").into());
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.model.max_turns == 0 || self.model.max_turns > 50 {
            return Err(
                LimerickError::config("Model max turns must be between 1 and 50").into(),
            );
        }

        if self.services.fact_timeout_seconds == 0 || self.services.fact_timeout_seconds > 300 {
            return Err(LimerickError::config(
                "Fact timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(LimerickError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(LimerickError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("Model base URL", &self.model.base_url),
            ("Geocoding URL", &self.services.geocoding_url),
            ("Forecast URL", &self.services.forecast_url),
            ("Facts URL", &self.services.facts_url),
        ];
        for (label, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(LimerickError::config(format!(
                    "{label} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
