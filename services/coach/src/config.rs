use coach_core::llm_client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
///
/// Read once and treated as immutable for the rest of the session.
#[derive(Debug)]
pub struct Config {
    /// Bearer credential for the remote service. `None` selects heuristic feedback.
    pub openai_api_key: Option<SecretString>,
    pub api_url: String,
    pub chat_model: String,
    pub request_timeout: Duration,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(SecretString::from)
            .filter(|key| !key.expose_secret().trim().is_empty());

        let api_url =
            std::env::var("COACH_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let chat_model = std::env::var("COACH_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let request_timeout = match std::env::var("COACH_TIMEOUT_SECS") {
            Ok(secs) => match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "COACH_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a positive number of seconds", secs),
                    ));
                }
            },
            Err(_) => DEFAULT_TIMEOUT,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            openai_api_key,
            api_url,
            chat_model,
            request_timeout,
            log_level,
        })
    }
}
