//! services/client/src/error.rs
//!
//! Defines the primary error type for the client service. Controller gestures
//! never return it; failures there become toasts. It covers startup and the
//! CLI's own plumbing.

use crate::config::ConfigError;
use coursify_core::render::RenderError;

/// The primary error type for the `client` service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a page template that failed to render.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Represents an error building the HTTP client.
    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., writing the page).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
