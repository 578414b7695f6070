//! Error types and handling for LimerickBot

use thiserror::Error;

/// Main error type for the weather pipeline and configuration
#[derive(Error, Debug)]
pub enum LimerickError {
    /// The geocoder returned no candidates for the query
    #[error("Could not find location: {query}")]
    LocationNotFound { query: String },

    /// The forecast response had no current-weather section
    #[error("Could not retrieve weather data")]
    WeatherUnavailable,

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl LimerickError {
    /// Create a new location-not-found error for the given query
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LimerickError::LocationNotFound { query } => {
                format!("No place called '{query}' could be found on the map.")
            }
            LimerickError::WeatherUnavailable => {
                "The weather service had no current conditions for that place.".to_string()
            }
            LimerickError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            LimerickError::Validation { message } => format!("Invalid input: {message}"),
            LimerickError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            LimerickError::Io { .. } => "Console I/O failed.".to_string(),
        }
    }
}

impl From<reqwest::Error> for LimerickError {
    fn from(err: reqwest::Error) -> Self {
        LimerickError::api(err.to_string())
    }
}

/// Failure modes of the fact service, collapsed into a fallback fact by the caller
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
