//! Comments and attachments of a task

use crate::client::ApiClient;
use crate::draft::{CommentDraft, Validate};
use crate::error::{ClientError, ValidationError};
use crate::request::Part;
use serde_json::Value;
use taskflow_model::{Attachment, Comment, EntityId};

/// Multipart field the backend reads uploads from
pub const UPLOAD_FIELD: &str = "file";

/// Comment and attachment endpoints
#[derive(Debug, Clone)]
pub struct ActivityService {
    api: ApiClient,
}

impl ActivityService {
    /// Create service
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET tasks/{id}/comments`
    ///
    /// # Errors
    /// Transport or decode failure
    pub async fn comments(&self, task: EntityId) -> Result<Vec<Comment>, ClientError> {
        self.api.get(&format!("tasks/{task}/comments")).await
    }

    /// `POST tasks/{id}/comments`
    ///
    /// # Errors
    /// Validation or transport failure
    pub async fn add_comment(
        &self,
        task: EntityId,
        draft: &CommentDraft,
    ) -> Result<Value, ClientError> {
        draft.validate()?;
        self.api.post(&format!("tasks/{task}/comments"), draft).await
    }

    /// `PUT comments/{id}`
    ///
    /// # Errors
    /// Validation or transport failure
    pub async fn update_comment(
        &self,
        comment: EntityId,
        draft: &CommentDraft,
    ) -> Result<Value, ClientError> {
        draft.validate()?;
        self.api.put(&format!("comments/{comment}"), draft).await
    }

    /// `DELETE comments/{id}`
    ///
    /// # Errors
    /// Transport failure
    pub async fn delete_comment(&self, comment: EntityId) -> Result<(), ClientError> {
        self.api.delete(&format!("comments/{comment}")).await
    }

    /// `GET tasks/{id}/attachments`
    ///
    /// # Errors
    /// Transport or decode failure
    pub async fn attachments(&self, task: EntityId) -> Result<Vec<Attachment>, ClientError> {
        self.api.get(&format!("tasks/{task}/attachments")).await
    }

    /// Multipart `POST tasks/{id}/attachments`
    ///
    /// # Errors
    /// Empty file list, transport or decode failure
    pub async fn upload(&self, task: EntityId, files: Vec<Part>) -> Result<Value, ClientError> {
        if files.is_empty() {
            return Err(ValidationError::Required(UPLOAD_FIELD).into());
        }
        tracing::info!(%task, files = files.len(), "uploading attachments");
        self.api.upload(&format!("tasks/{task}/attachments"), files).await
    }

    /// `DELETE attachments/{id}`
    ///
    /// # Errors
    /// Transport failure
    pub async fn delete_attachment(&self, attachment: EntityId) -> Result<(), ClientError> {
        self.api.delete(&format!("attachments/{attachment}")).await
    }
}
