//! The transport seam

use crate::error::TransportError;
use crate::request::Request;
use async_trait::async_trait;
use serde_json::Value;

/// Sends one request and returns the decoded JSON body
///
/// Empty bodies come back as [`Value::Null`]. Non-2xx statuses are
/// [`TransportError::Status`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request`
    async fn send(&self, request: Request) -> Result<Value, TransportError>;
}
