//! Logging setup and the themed console used by the chat loop

use crate::config::LoggingConfig;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr so
/// they never interleave with the conversation on stdout.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("limerick_bot={}", config.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(err) = result {
        eprintln!("logging already initialized: {err}");
    }
}

/// Console theme for user-facing output
pub mod theme {
    use super::OwoColorize;

    #[must_use]
    pub fn info(text: &str) -> String {
        text.cyan().to_string()
    }

    #[must_use]
    pub fn success(text: &str) -> String {
        text.green().to_string()
    }

    #[must_use]
    pub fn error(text: &str) -> String {
        text.red().bold().to_string()
    }

    #[must_use]
    pub fn banner(text: &str) -> String {
        text.magenta().bold().to_string()
    }

    #[must_use]
    pub fn bold(text: &str) -> String {
        text.bold().to_string()
    }
}
