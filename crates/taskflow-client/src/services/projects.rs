//! `projects` resource

use crate::client::ApiClient;
use crate::draft::{ProjectDraft, StatusChange, Validate};
use crate::error::ClientError;
use serde_json::Value;
use taskflow_model::{Category, EntityId, Project, ProjectMember, ProjectStatus};

/// Project endpoints
#[derive(Debug, Clone)]
pub struct ProjectService {
    api: ApiClient,
}

impl ProjectService {
    /// Create service
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET projects`
    ///
    /// # Errors
    /// Transport or decode failure
    pub async fn list(&self) -> Result<Vec<Project>, ClientError> {
        self.api.get("projects").await
    }

    /// `GET projects/{id}`
    ///
    /// # Errors
    /// Transport or decode failure
    pub async fn find(&self, id: EntityId) -> Result<Project, ClientError> {
        self.api.get(&format!("projects/{id}")).await
    }

    /// `POST projects`
    ///
    /// # Errors
    /// Validation, transport or decode failure
    pub async fn create(&self, draft: &ProjectDraft) -> Result<Value, ClientError> {
        draft.validate()?;
        tracing::info!(name = %draft.name, "creating project");
        self.api.post("projects", &draft.for_create()).await
    }

    /// `PUT projects/{id}`
    ///
    /// # Errors
    /// Validation, transport or decode failure; 403 when the caller does not
    /// manage the project
    pub async fn update(&self, id: EntityId, draft: &ProjectDraft) -> Result<Value, ClientError> {
        draft.validate()?;
        tracing::info!(project = %id, "updating project");
        self.api.put(&format!("projects/{id}"), &draft.for_update()).await
    }

    /// Mark a project done
    ///
    /// # Errors
    /// Transport failure; 403 when the caller does not manage the project
    pub async fn finalize(&self, id: EntityId) -> Result<Value, ClientError> {
        tracing::info!(project = %id, "finalizing project");
        let change = StatusChange {
            status: ProjectStatus::Done,
        };
        self.api.put(&format!("projects/{id}"), &change).await
    }

    /// `DELETE projects/{id}`
    ///
    /// # Errors
    /// Transport failure; 403 when the caller does not manage the project
    pub async fn delete(&self, id: EntityId) -> Result<(), ClientError> {
        tracing::info!(project = %id, "deleting project");
        self.api.delete(&format!("projects/{id}")).await
    }

    /// `GET projects/categories`
    ///
    /// # Errors
    /// Transport or decode failure
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.api.get("projects/categories").await
    }

    /// `GET projects/{id}/members`
    ///
    /// # Errors
    /// Transport or decode failure
    pub async fn members(&self, id: EntityId) -> Result<Vec<ProjectMember>, ClientError> {
        self.api.get(&format!("projects/{id}/members")).await
    }
}
