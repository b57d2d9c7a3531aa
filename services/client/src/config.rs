//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_API_BASE_URL: &str = "https://coursify-server-t8ou.onrender.com/api/v1";
pub const DEFAULT_TOAST_MS: u64 = 3000;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub session_path: PathBuf,
    pub log_level: Level,
    pub toast_duration: Duration,
    /// No timeout unless configured; a hung request keeps the spinner up.
    pub request_timeout: Option<Duration>,
    /// Clear the role's token when a gated call comes back 401.
    pub clear_on_unauthorized: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Remote API ---
        let api_base_url = var("COURSIFY_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "COURSIFY_API_BASE_URL".to_string(),
                format!("'{}' is not an http(s) URL", api_base_url),
            ));
        }

        // --- Session Storage ---
        let session_path = match var("COURSIFY_SESSION_PATH") {
            Some(path) => PathBuf::from(path),
            None => dirs::data_dir()
                .map(|dir| dir.join("coursify").join("session.json"))
                .ok_or_else(|| ConfigError::MissingVar("COURSIFY_SESSION_PATH".to_string()))?,
        };

        // --- Logging ---
        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Presentation and Transport ---
        let toast_ms = parse_number(&var, "COURSIFY_TOAST_MS")?.unwrap_or(DEFAULT_TOAST_MS);
        let request_timeout =
            parse_number(&var, "COURSIFY_REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs);

        let clear_on_unauthorized = match var("COURSIFY_CLEAR_ON_UNAUTHORIZED") {
            None => false,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "COURSIFY_CLEAR_ON_UNAUTHORIZED".to_string(),
                        format!("'{}' is not a boolean", raw),
                    ))
                }
            },
        };

        Ok(Self {
            api_base_url,
            session_path,
            log_level,
            toast_duration: Duration::from_millis(toast_ms),
            request_timeout,
            clear_on_unauthorized,
        })
    }

    /// Defaults pointed at a given API and session file.
    pub fn new(api_base_url: impl Into<String>, session_path: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            session_path: session_path.into(),
            log_level: Level::INFO,
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
            request_timeout: None,
            clear_on_unauthorized: false,
        }
    }
}

fn parse_number(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<u64>, ConfigError> {
    var(name)
        .map(|raw| {
            raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(name.to_string(), format!("'{}' is not a number", raw))
            })
        })
        .transpose()
}
