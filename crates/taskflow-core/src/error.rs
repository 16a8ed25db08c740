//! Error types for the application layer

use taskflow_client::ClientError;
use taskflow_view::ViewError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// View misconfigured
    #[error(transparent)]
    View(#[from] ViewError),

    /// Backend refused the action for the signed-in user
    #[error("not allowed to {action}")]
    Forbidden {
        /// What was attempted
        action: &'static str,
    },

    /// No valid session
    #[error("not logged in")]
    NotLoggedIn,

    /// Entity not present in the current collection
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind
        kind: taskflow_model::EntityKind,
        /// Identifier looked up
        id: taskflow_model::EntityId,
    },

    /// Configuration file or override invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Logging already initialized or filter invalid
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

impl AppError {
    /// Map a 403 onto [`AppError::Forbidden`], keep everything else
    #[must_use]
    pub fn from_client(err: ClientError, action: &'static str) -> Self {
        if err.is_forbidden() {
            Self::Forbidden { action }
        } else if err.is_unauthorized() {
            Self::NotLoggedIn
        } else {
            Self::Client(err)
        }
    }

    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Client(err) if err.is_retryable())
    }

    /// Whether the user must sign in again
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::NotLoggedIn => true,
            Self::Client(err) => err.is_unauthorized(),
            _ => false,
        }
    }
}
