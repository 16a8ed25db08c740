//! `tasks` resource

use crate::client::ApiClient;
use crate::draft::{TaskDraft, Validate};
use crate::error::ClientError;
use serde_json::Value;
use taskflow_model::{EntityId, Task};

/// Task endpoints
#[derive(Debug, Clone)]
pub struct TaskService {
    api: ApiClient,
}

impl TaskService {
    /// Create service
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET projects/{id}/tasks`
    ///
    /// # Errors
    /// Transport or decode failure
    pub async fn list(&self, project: EntityId) -> Result<Vec<Task>, ClientError> {
        self.api.get(&format!("projects/{project}/tasks")).await
    }

    /// `POST projects/{id}/tasks`
    ///
    /// # Errors
    /// Validation or transport failure
    pub async fn create(&self, project: EntityId, draft: &TaskDraft) -> Result<Value, ClientError> {
        draft.validate()?;
        tracing::info!(%project, title = %draft.title, "creating task");
        self.api.post(&format!("projects/{project}/tasks"), draft).await
    }

    /// `PUT tasks/{id}`
    ///
    /// # Errors
    /// Validation or transport failure
    pub async fn update(&self, task: EntityId, draft: &TaskDraft) -> Result<Value, ClientError> {
        draft.validate()?;
        tracing::info!(%task, "updating task");
        self.api.put(&format!("tasks/{task}"), draft).await
    }

    /// `DELETE tasks/{id}`
    ///
    /// # Errors
    /// Transport failure
    pub async fn delete(&self, task: EntityId) -> Result<(), ClientError> {
        tracing::info!(%task, "deleting task");
        self.api.delete(&format!("tasks/{task}")).await
    }
}
