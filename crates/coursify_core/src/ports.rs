//! crates/coursify_core/src/ports.rs
//!
//! Defines the service contracts (traits) the client logic depends on.
//! These traits form the boundary of the hexagonal architecture: the remote
//! course API and the token storage are both reached only through them.

use crate::domain::{Course, CourseDraft, CourseId, Credentials, Role, SessionToken, SignupForm};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A gated call was attempted without a stored token.
    #[error("Unauthorized")]
    Unauthorized,
    /// The API answered with a non-success status.
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("Session storage error: {0}")]
    Storage(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            PortError::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Message to show the user: the server's own message, else `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }

    /// True for a 401 answer from the API.
    pub fn is_unauthorized_status(&self) -> bool {
        matches!(self, PortError::Rejected { status: 401, .. })
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Persistent per-role token storage. No expiry, no validation.
pub trait SessionStore: Send + Sync {
    fn get(&self, role: Role) -> PortResult<Option<SessionToken>>;

    fn set(&self, role: Role, token: SessionToken) -> PortResult<()>;

    fn clear(&self, role: Role) -> PortResult<()>;
}

/// The remote course API. Gated operations take the caller's token.
#[async_trait]
pub trait CourseGateway: Send + Sync {
    // --- Authentication ---
    async fn sign_in(&self, role: Role, credentials: &Credentials) -> PortResult<SessionToken>;

    async fn sign_up(&self, role: Role, form: &SignupForm) -> PortResult<()>;

    // --- Public Catalogue ---
    async fn preview_courses(&self) -> PortResult<Vec<Course>>;

    // --- User Operations ---
    async fn purchase_course(&self, token: &SessionToken, course_id: &CourseId) -> PortResult<()>;

    async fn purchased_courses(&self, token: &SessionToken) -> PortResult<Vec<Course>>;

    // --- Admin Operations ---
    async fn create_course(&self, token: &SessionToken, draft: &CourseDraft) -> PortResult<()>;

    async fn admin_courses(&self, token: &SessionToken) -> PortResult<Vec<Course>>;

    async fn admin_course(&self, token: &SessionToken, course_id: &CourseId)
        -> PortResult<Course>;

    async fn update_course(
        &self,
        token: &SessionToken,
        course_id: &CourseId,
        draft: &CourseDraft,
    ) -> PortResult<()>;

    async fn delete_course(&self, token: &SessionToken, course_id: &CourseId) -> PortResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = PortError::Rejected {
            status: 409,
            message: Some("Already purchased".to_string()),
        };
        assert_eq!(err.user_message("Error purchasing course"), "Already purchased");
    }

    #[test]
    fn status_alone_uses_fallback() {
        for status in [401, 500] {
            let err = PortError::Rejected {
                status,
                message: None,
            };
            assert_eq!(err.user_message("Error loading courses"), "Error loading courses");
        }
        let empty = PortError::Rejected {
            status: 400,
            message: Some(String::new()),
        };
        assert_eq!(empty.user_message("fallback"), "fallback");
        assert_eq!(
            PortError::Transport("refused".into()).user_message("fallback"),
            "fallback"
        );
    }
}
