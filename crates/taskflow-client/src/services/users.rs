//! `users` and `auth` resources

use crate::client::ApiClient;
use crate::draft::{Credentials, ProfileUpdate, Registration, RoleAssignment, Validate};
use crate::error::ClientError;
use serde_json::{json, Value};
use taskflow_model::{EntityId, User};

/// User directory and profile endpoints
#[derive(Debug, Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    /// Create service
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET users`
    ///
    /// # Errors
    /// Transport or decode failure
    pub async fn list(&self) -> Result<Vec<User>, ClientError> {
        self.api.get("users").await
    }

    /// `PUT users/me`
    ///
    /// # Errors
    /// Validation or transport failure
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Value, ClientError> {
        update.validate()?;
        self.api.put("users/me", update).await
    }

    /// `POST users/{id}/roles`
    ///
    /// # Errors
    /// Transport failure; 403 unless the caller is an administrator
    pub async fn assign_role(&self, user: EntityId, role: EntityId) -> Result<Value, ClientError> {
        tracing::info!(%user, %role, "assigning role");
        self.api
            .post(&format!("users/{user}/roles"), &RoleAssignment { role_id: role })
            .await
    }
}

/// Session endpoints
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    /// Create service
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET auth/session`: the signed-in user
    ///
    /// # Errors
    /// 401 when there is no session; transport or decode failure
    pub async fn session(&self) -> Result<User, ClientError> {
        self.api.get("auth/session").await
    }

    /// `POST auth/login`
    ///
    /// # Errors
    /// Validation or transport failure
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ClientError> {
        credentials.validate()?;
        self.api.post("auth/login", credentials).await
    }

    /// `POST auth/register`
    ///
    /// # Errors
    /// Validation or transport failure
    pub async fn register(&self, registration: &Registration) -> Result<Value, ClientError> {
        registration.validate()?;
        self.api.post("auth/register", registration).await
    }

    /// `POST auth/logout`
    ///
    /// # Errors
    /// Transport failure
    pub async fn logout(&self) -> Result<(), ClientError> {
        let _: Value = self.api.post("auth/logout", &json!({})).await?;
        Ok(())
    }
}
