//! reqwest-backed transport
//!
//! Sends JSON with credentials: the client keeps a cookie store so the
//! session cookie set by `auth/login` rides along on later requests.

use crate::error::TransportError;
use crate::request::{Body, Method, Request};
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part as FormPart};
use serde_json::Value;
use std::time::Duration;

/// Backend address used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport against one base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with a cookie store and the given timeout
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidRequest`] if the TLS backend or
    /// client cannot be initialized
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an already configured client
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL without trailing slash
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a request path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build(&self, request: Request) -> Result<reqwest::RequestBuilder, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    let mut piece = FormPart::bytes(part.data);
                    if let Some(file_name) = part.file_name {
                        piece = piece.file_name(file_name);
                    }
                    if let Some(mime) = part.mime_type {
                        piece = piece
                            .mime_str(&mime)
                            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                    }
                    form = form.part(part.name, piece);
                }
                builder.multipart(form)
            }
        };
        Ok(builder)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::with_client(reqwest::Client::new(), DEFAULT_BASE_URL)
    }
}

fn network(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Value, TransportError> {
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(%method, %path, "sending request");

        let response = self.build(request)?.send().await.map_err(|e| network(&e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| network(&e))?;

        if !status.is_success() {
            tracing::debug!(%method, %path, status = status.as_u16(), "request rejected");
            return Err(TransportError::Status {
                method,
                path,
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| TransportError::InvalidBody(e.to_string()))
    }
}
