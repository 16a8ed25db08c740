//! Typed request payloads
//!
//! Every draft is checked with [`Validate::validate`] before a service sends
//! it, so an incomplete form never reaches the backend.

use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::Serialize;
use taskflow_model::{EntityId, Priority, ProjectStatus, TaskStatus, TaskType};

/// Client-side validation of a payload
pub trait Validate {
    /// Check required fields and cross-field rules
    ///
    /// # Errors
    /// The first rule the payload breaks
    fn validate(&self) -> Result<(), ValidationError>;
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

/// Input for creating or editing a project
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    /// Project name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    pub category_id: Option<EntityId>,
    /// First day
    pub start_date: Option<NaiveDate>,
    /// Last day
    pub end_date: Option<NaiveDate>,
    /// Selected members
    pub member_ids: Vec<EntityId>,
}

impl ProjectDraft {
    /// Draft with a name and nothing else
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: EntityId) -> Self {
        self.category_id = Some(category);
        self
    }

    /// With schedule
    #[inline]
    #[must_use]
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// With members
    #[inline]
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = EntityId>) -> Self {
        self.member_ids = members.into_iter().collect();
        self
    }

    /// Payload for `POST projects`; new projects always start active
    #[must_use]
    pub fn for_create(&self) -> ProjectPayload<'_> {
        ProjectPayload {
            draft: self,
            status: Some(ProjectStatus::Active),
        }
    }

    /// Payload for `PUT projects/{id}`; the status is left to the backend
    #[must_use]
    pub fn for_update(&self) -> ProjectPayload<'_> {
        ProjectPayload {
            draft: self,
            status: None,
        }
    }
}

impl Validate for ProjectDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "name")?;
        if self.category_id.is_none() {
            return Err(ValidationError::Required("categoryId"));
        }
        let start = self.start_date.ok_or(ValidationError::Required("startDate"))?;
        let end = self.end_date.ok_or(ValidationError::Required("endDate"))?;
        if end < start {
            return Err(ValidationError::DateOrder {
                start: "startDate",
                end: "endDate",
            });
        }
        Ok(())
    }
}

/// Wire form of a [`ProjectDraft`]
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPayload<'a> {
    #[serde(flatten)]
    draft: &'a ProjectDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<ProjectStatus>,
}

/// Body of the finalize call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    /// New status
    pub status: ProjectStatus,
}

/// Input for creating or editing a task
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Title
    pub title: String,
    /// Description
    pub description: Option<String>,
    /// Workflow status
    pub status: TaskStatus,
    /// Priority
    pub priority: Priority,
    /// Planned start
    pub start_date: Option<NaiveDate>,
    /// Due day
    pub due_date: Option<NaiveDate>,
    /// Kind of work
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    /// Assigned user
    pub assignee_id: Option<EntityId>,
}

impl TaskDraft {
    /// Draft with a title and defaults elsewhere
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// With assignee
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee: EntityId) -> Self {
        self.assignee_id = Some(assignee);
        self
    }

    /// With due day
    #[inline]
    #[must_use]
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }
}

impl From<&taskflow_model::Task> for TaskDraft {
    fn from(task: &taskflow_model::Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            start_date: task.start_date,
            due_date: task.due_date,
            task_type: task.task_type,
            assignee_id: task.assignee_id(),
        }
    }
}

impl Validate for TaskDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.title, "title")?;
        if let (Some(start), Some(due)) = (self.start_date, self.due_date) {
            if due < start {
                return Err(ValidationError::DateOrder {
                    start: "startDate",
                    end: "dueDate",
                });
            }
        }
        Ok(())
    }
}

/// Body of a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentDraft {
    /// Text
    pub body: String,
}

impl CommentDraft {
    /// Create a comment draft
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl Validate for CommentDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.body, "body")
    }
}

/// Login form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Email
    pub email: String,
    /// Password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

fn valid_email(email: &str) -> Result<(), ValidationError> {
    required(email, "email")?;
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| ValidationError::InvalidEmail(email.to_string()))?;
    if local.trim().is_empty() || domain.trim().is_empty() {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidationError> {
        valid_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        Ok(())
    }
}

/// Sign-up form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Full name
    pub full_name: String,
    /// Email
    pub email: String,
    /// Password
    pub password: String,
    /// Job title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Validate for Registration {
    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.full_name, "fullName")?;
        valid_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        Ok(())
    }
}

/// Editable fields of the signed-in user's profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Full name
    pub full_name: String,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Job title
    pub position: Option<String>,
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.full_name, "fullName")
    }
}

/// Body of a role grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    /// Role to grant
    pub role_id: EntityId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn complete() -> ProjectDraft {
        ProjectDraft::new("Website Redesign")
            .with_category(EntityId(2))
            .with_dates(day(1), day(20))
            .with_members([EntityId(3)])
    }

    #[test]
    fn project_draft_requires_fields() {
        assert_eq!(
            ProjectDraft::new(" ").validate(),
            Err(ValidationError::Required("name"))
        );
        assert_eq!(
            ProjectDraft::new("x").validate(),
            Err(ValidationError::Required("categoryId"))
        );
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn project_end_before_start_is_rejected() {
        let draft = complete().with_dates(day(20), day(1));
        assert!(matches!(draft.validate(), Err(ValidationError::DateOrder { .. })));
    }

    #[test]
    fn create_payload_forces_active_status() {
        let json = serde_json::to_value(complete().for_create()).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["categoryId"], 2);
        assert_eq!(json["startDate"], "2025-03-01");
        assert_eq!(json["memberIds"], json!([3]));

        let json = serde_json::to_value(complete().for_update()).unwrap();
        assert!(json.get("status").is_none());
    }

    #[test]
    fn task_payload_uses_backend_labels() {
        let draft = TaskDraft::new("Launch email campaign")
            .with_status(TaskStatus::InProgress)
            .with_priority(Priority::High)
            .with_assignee(EntityId(3));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["status"], "Em progresso");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["assigneeId"], 3);
    }

    #[test]
    fn credentials_need_an_email() {
        assert!(Credentials::new("admin@taskflow.com", "admin123").validate().is_ok());
        assert!(matches!(
            Credentials::new("admin", "x").validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert_eq!(
            Credentials::new("a@b", "").validate(),
            Err(ValidationError::Required("password"))
        );
    }

    #[test]
    fn blank_comment_is_rejected() {
        assert_eq!(
            CommentDraft::new("  ").validate(),
            Err(ValidationError::Required("body"))
        );
    }
}
