//! Tasks and their workflow enums

use crate::date;
use crate::error::ModelError;
use crate::id::EntityId;
use crate::record::{EntityKind, FilterValue, Record, SearchFields};
use crate::user::UserSummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use std::fmt;
use std::str::FromStr;

/// Task workflow status
///
/// The backend stores localized labels (`A fazer`, `Em progresso`,
/// `Concluída`); parsing accepts both those and the slugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
}

impl TaskStatus {
    /// All statuses in board order
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Completed];

    /// Wire slug
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Display label, also the value the backend persists
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "A fazer",
            Self::InProgress => "Em progresso",
            Self::Completed => "Concluída",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to-do" | "a fazer" => Ok(Self::Todo),
            "in-progress" | "in_progress" | "em progresso" => Ok(Self::InProgress),
            "completed" | "done" | "concluída" | "concluida" => Ok(Self::Completed),
            _ => Err(ModelError::unknown("task status", s)),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Priority {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
}

impl Priority {
    /// All priorities, lowest first
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire slug
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Display label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Média",
            Self::High => "Alta",
        }
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baixa" => Ok(Self::Low),
            "medium" | "média" | "media" => Ok(Self::Medium),
            "high" | "alta" => Ok(Self::High),
            _ => Err(ModelError::unknown("priority", s)),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of work a task represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// New functionality
    Feature,
    /// Bug fix
    Fix,
    /// Restructuring
    Refactor,
    /// Documentation
    Docs,
    /// Tests
    Test,
    /// Anything else
    Others,
}

impl TaskType {
    /// All task types
    pub const ALL: [Self; 6] = [
        Self::Feature,
        Self::Fix,
        Self::Refactor,
        Self::Docs,
        Self::Test,
        Self::Others,
    ];

    /// Wire slug
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Fix => "fix",
            Self::Refactor => "refactor",
            Self::Docs => "docs",
            Self::Test => "test",
            Self::Others => "others",
        }
    }
}

impl FromStr for TaskType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::unknown("task type", s))
    }
}

/// A task inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task id
    pub id: EntityId,
    /// Owning project
    #[serde(default)]
    pub project_id: Option<EntityId>,
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow status
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
    /// Kind of work
    #[serde(default)]
    pub task_type: Option<TaskType>,
    /// Planned start
    #[serde(default, with = "date::optional")]
    pub start_date: Option<NaiveDate>,
    /// Due day
    #[serde(default, with = "date::optional")]
    pub due_date: Option<NaiveDate>,
    /// Assigned user
    #[serde(default)]
    pub assignee_id: Option<EntityId>,
    /// Assigned user summary
    #[serde(default)]
    pub assignee: Option<UserSummary>,
    /// Creation day
    #[serde(default, with = "date::optional")]
    pub created_at: Option<NaiveDate>,
}

impl Task {
    /// Status filter field
    pub const STATUS: &'static str = "status";
    /// Priority filter field
    pub const PRIORITY: &'static str = "priority";
    /// Task type filter field
    pub const TYPE: &'static str = "type";
    /// Assignee filter field
    pub const ASSIGNEE: &'static str = "assignee";

    /// Create a task with only the required fields set
    #[must_use]
    pub fn new(id: EntityId, title: impl Into<String>) -> Self {
        Self {
            id,
            project_id: None,
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            task_type: None,
            start_date: None,
            due_date: None,
            assignee_id: None,
            assignee: None,
            created_at: None,
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

    /// Assignee id, falling back to the embedded summary
    #[inline]
    #[must_use]
    pub fn assignee_id(&self) -> Option<EntityId> {
        self.assignee_id.or_else(|| self.assignee.as_ref().map(|a| a.id))
    }

    /// Whether the task is past due on `today` and not completed
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < today)
    }
}

impl Record for Task {
    const KIND: EntityKind = EntityKind::Task;
    const FILTER_FIELDS: &'static [&'static str] =
        &[Self::STATUS, Self::PRIORITY, Self::TYPE, Self::ASSIGNEE];

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_fields(&self) -> SearchFields<'_> {
        smallvec![Some(self.title.as_str()), self.description.as_deref()]
    }

    fn filter_value(&self, field: &str) -> Option<FilterValue> {
        match field {
            Self::STATUS => Some(FilterValue::new(self.status.as_str())),
            Self::PRIORITY => Some(FilterValue::new(self.priority.as_str())),
            Self::TYPE => self.task_type.map(|t| FilterValue::new(t.as_str())),
            Self::ASSIGNEE => self.assignee_id().map(FilterValue::from),
            _ => None,
        }
    }

    fn normalize_filter(field: &str, raw: &str) -> FilterValue {
        let slug = match field {
            Self::STATUS => raw.parse::<TaskStatus>().ok().map(|s| s.as_str()),
            Self::PRIORITY => raw.parse::<Priority>().ok().map(|p| p.as_str()),
            Self::TYPE => raw.parse::<TaskType>().ok().map(|t| t.as_str()),
            _ => None,
        };
        FilterValue::new(slug.unwrap_or(raw))
    }
}
