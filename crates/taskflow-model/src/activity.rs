//! Task activity: comments and attachments

use crate::id::EntityId;
use crate::user::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment id
    pub id: EntityId,
    /// Task commented on
    #[serde(default)]
    pub task_id: Option<EntityId>,
    /// Comment text
    pub body: String,
    /// Author
    #[serde(default, alias = "user")]
    pub author: Option<UserSummary>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Whether `user` wrote this comment
    #[inline]
    #[must_use]
    pub fn is_authored_by(&self, user: EntityId) -> bool {
        self.author.as_ref().is_some_and(|a| a.id == user)
    }
}

/// A file attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment id
    pub id: EntityId,
    /// Task the file belongs to
    #[serde(default)]
    pub task_id: Option<EntityId>,
    /// Original file name
    #[serde(alias = "filename", alias = "originalName")]
    pub file_name: String,
    /// Download URL
    #[serde(default)]
    pub url: Option<String>,
    /// MIME type
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,
    /// Upload time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
