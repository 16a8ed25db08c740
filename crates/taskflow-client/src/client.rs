//! Generic request helper shared by every service

use crate::error::ClientError;
use crate::request::{Method, Part, Request};
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Typed request helper over a [`Transport`]
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client over `transport`
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Underlying transport
    #[inline]
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// GET and decode
    ///
    /// # Errors
    /// Transport failure or a body that does not decode into `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.fetch(Request::get(path)).await
    }

    /// POST a JSON payload and decode the reply
    ///
    /// # Errors
    /// Transport failure or a body that does not decode into `T`
    pub async fn post<B, T>(&self, path: &str, payload: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.fetch(self.with_payload(Method::Post, path, payload)?).await
    }

    /// PUT a JSON payload and decode the reply
    ///
    /// # Errors
    /// Transport failure or a body that does not decode into `T`
    pub async fn put<B, T>(&self, path: &str, payload: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.fetch(self.with_payload(Method::Put, path, payload)?).await
    }

    /// PATCH a JSON payload and decode the reply
    ///
    /// # Errors
    /// Transport failure or a body that does not decode into `T`
    pub async fn patch<B, T>(&self, path: &str, payload: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.fetch(self.with_payload(Method::Patch, path, payload)?).await
    }

    /// DELETE, ignoring any reply body
    ///
    /// # Errors
    /// Transport failure
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(Request::delete(path)).await
    }

    /// POST multipart form parts and decode the reply
    ///
    /// # Errors
    /// Transport failure or a body that does not decode into `T`
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<Part>,
    ) -> Result<T, ClientError> {
        self.fetch(Request::new(Method::Post, path).with_parts(parts)).await
    }

    /// Send a request and decode the reply
    ///
    /// # Errors
    /// Transport failure or a body that does not decode into `T`
    pub async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, ClientError> {
        let path = request.path.clone();
        let value = self.transport.send(request).await?;
        serde_json::from_value(value).map_err(|source| ClientError::Decode { path, source })
    }

    /// Send a request whose reply does not matter
    ///
    /// # Errors
    /// Transport failure
    pub async fn execute(&self, request: Request) -> Result<(), ClientError> {
        self.transport.send(request).await?;
        Ok(())
    }

    /// Send a request and return the raw JSON
    ///
    /// # Errors
    /// Transport failure
    pub async fn raw(&self, request: Request) -> Result<Value, ClientError> {
        Ok(self.transport.send(request).await?)
    }

    fn with_payload<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<Request, ClientError> {
        let body = serde_json::to_value(payload).map_err(|source| ClientError::Encode {
            path: path.to_string(),
            source,
        })?;
        Ok(Request::new(method, path).with_json(body))
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}
