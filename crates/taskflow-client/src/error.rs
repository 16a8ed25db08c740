//! Error types for the REST collaborators

use crate::request::Method;

/// Failure below the JSON layer: connection, status code, timeout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Backend answered with a non-2xx status
    #[error("{method} {path} returned {status}")]
    Status {
        /// Request method
        method: Method,
        /// Request path
        path: String,
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// Connection could not be established or was dropped
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Body was not valid JSON
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// Request could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Status code if the backend answered
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401: no valid session
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 403: session valid but not allowed, e.g. not the project manager
    #[inline]
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// 404
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Status { status, .. } => *status >= 500,
            Self::InvalidBody(_) | Self::InvalidRequest(_) => false,
        }
    }
}

/// A draft rejected before any request was sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required field missing or blank
    #[error("{0} is required")]
    Required(&'static str),

    /// End date precedes start date
    #[error("{end} must not be before {start}")]
    DateOrder {
        /// Start field
        start: &'static str,
        /// End field
        end: &'static str,
    },

    /// Email address malformed
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// Main client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response JSON did not match the expected shape
    #[error("unexpected response from {path}: {source}")]
    Decode {
        /// Request path
        path: String,
        /// Serde failure
        #[source]
        source: serde_json::Error,
    },

    /// Payload could not be serialized
    #[error("could not encode request for {path}: {source}")]
    Encode {
        /// Request path
        path: String,
        /// Serde failure
        #[source]
        source: serde_json::Error,
    },

    /// Draft failed validation
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Transport error, if that is the cause
    #[inline]
    #[must_use]
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }

    /// 401 from the backend
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.transport().is_some_and(TransportError::is_unauthorized)
    }

    /// 403 from the backend
    #[inline]
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.transport().is_some_and(TransportError::is_forbidden)
    }

    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.transport().is_some_and(TransportError::is_retryable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> TransportError {
        TransportError::Status {
            method: Method::Put,
            path: "projects/1".into(),
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn status_predicates() {
        assert!(status(401).is_unauthorized());
        assert!(status(403).is_forbidden());
        assert!(!status(403).is_retryable());
        assert!(status(503).is_retryable());
        assert!(TransportError::Timeout.is_retryable());
    }

    #[test]
    fn client_error_delegates_to_transport() {
        let err = ClientError::from(status(403));
        assert!(err.is_forbidden());
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "PUT projects/1 returned 403");

        let err = ClientError::from(ValidationError::Required("name"));
        assert!(err.transport().is_none());
    }
}
