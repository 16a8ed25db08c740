//! Projects and their categories

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

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProjectStatus {
    /// Open for work
    #[default]
    Active,
    /// Work under way
    InProgress,
    /// Paused
    OnHold,
    /// Finalized
    Done,
}

impl ProjectStatus {
    /// All statuses in display order
    pub const ALL: [Self; 4] = [Self::Active, Self::InProgress, Self::OnHold, Self::Done];

    /// Wire slug
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Done => "done",
        }
    }

    /// Display label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::InProgress => "Em Andamento",
            Self::OnHold => "Em Espera",
            Self::Done => "Finalizado",
        }
    }

    /// Whether the project has been finalized
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl FromStr for ProjectStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "ativo" => Ok(Self::Active),
            "in_progress" | "in-progress" | "em andamento" => Ok(Self::InProgress),
            "on_hold" | "on-hold" | "em espera" => Ok(Self::OnHold),
            "done" | "completed" | "finalized" | "finalizado" => Ok(Self::Done),
            _ => Err(ModelError::unknown("project status", s)),
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project category as returned by `projects/categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id
    pub id: EntityId,
    /// Category name
    pub name: String,
}

/// Category embedded in a project
///
/// Older payloads carry only the category name as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryRepr")]
pub struct CategoryRef {
    /// Category id, when known
    pub id: Option<EntityId>,
    /// Category name
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Name(String),
    Full {
        #[serde(default)]
        id: Option<EntityId>,
        name: String,
    },
}

impl From<CategoryRepr> for CategoryRef {
    fn from(repr: CategoryRepr) -> Self {
        match repr {
            CategoryRepr::Name(name) => Self { id: None, name },
            CategoryRepr::Full { id, name } => Self { id, name },
        }
    }
}

impl From<Category> for CategoryRef {
    fn from(category: Category) -> Self {
        Self {
            id: Some(category.id),
            name: category.name,
        }
    }
}

/// Membership entry of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// The member
    pub user: UserSummary,
    /// Role inside the project, if reported
    #[serde(default)]
    pub role: Option<String>,
}

/// Aggregate counters reported alongside a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectCounts {
    /// Number of members
    #[serde(default)]
    pub members: u32,
}

/// A project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id
    pub id: EntityId,
    /// Responsible manager
    #[serde(default, alias = "ownerId")]
    pub manager_id: Option<EntityId>,
    /// Project name
    pub name: String,
    /// Short key (e.g. `WEB`)
    #[serde(default)]
    pub project_key: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Category id
    #[serde(default)]
    pub category_id: Option<EntityId>,
    /// Embedded category
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// First day of work
    #[serde(default, with = "date::optional")]
    pub start_date: Option<NaiveDate>,
    /// Planned last day
    #[serde(default, alias = "dueDate", with = "date::optional")]
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,
    /// Completion percentage
    #[serde(default)]
    pub progress: Option<u8>,
    /// Manager summary
    #[serde(default)]
    pub manager: Option<UserSummary>,
    /// Member ids
    #[serde(default)]
    pub member_ids: Vec<EntityId>,
    /// Member entries
    #[serde(default)]
    pub members: Vec<ProjectMember>,
    /// Aggregate counters
    #[serde(default, rename = "_count")]
    pub counts: Option<ProjectCounts>,
    /// Creation day
    #[serde(default, with = "date::optional")]
    pub created_at: Option<NaiveDate>,
}

impl Project {
    /// Status filter field
    pub const STATUS: &'static str = "status";
    /// Category filter field
    pub const CATEGORY: &'static str = "category";
    /// Manager filter field
    pub const MANAGER: &'static str = "manager";

    /// Create a project with only the required fields set
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            manager_id: None,
            name: name.into(),
            project_key: None,
            description: None,
            category_id: None,
            category: None,
            start_date: None,
            end_date: None,
            status: ProjectStatus::default(),
            progress: None,
            manager: None,
            member_ids: Vec::new(),
            members: Vec::new(),
            counts: None,
            created_at: None,
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
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
    pub fn with_category(mut self, category: Category) -> Self {
        self.category_id = Some(category.id);
        self.category = Some(category.into());
        self
    }

    /// With manager
    #[inline]
    #[must_use]
    pub fn with_manager(mut self, manager: UserSummary) -> Self {
        self.manager_id = Some(manager.id);
        self.manager = Some(manager);
        self
    }

    /// Category name, if any
    #[inline]
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Category id, falling back to the embedded category's id
    #[inline]
    #[must_use]
    pub fn category_id(&self) -> Option<EntityId> {
        self.category_id.or_else(|| self.category.as_ref().and_then(|c| c.id))
    }

    /// Manager id, falling back to the embedded manager summary
    #[inline]
    #[must_use]
    pub fn manager_id(&self) -> Option<EntityId> {
        self.manager_id.or_else(|| self.manager.as_ref().map(|m| m.id))
    }

    /// Union of `member_ids` and `members`, in first-seen order
    #[must_use]
    pub fn all_member_ids(&self) -> Vec<EntityId> {
        let mut ids = self.member_ids.clone();
        for member in &self.members {
            if !ids.contains(&member.user.id) {
                ids.push(member.user.id);
            }
        }
        ids
    }

    /// Member count, preferring the backend's counter
    #[must_use]
    pub fn member_count(&self) -> usize {
        match self.counts {
            Some(counts) => counts.members as usize,
            None => self.all_member_ids().len(),
        }
    }

    /// Whether `user` manages this project
    #[inline]
    #[must_use]
    pub fn is_managed_by(&self, user: EntityId) -> bool {
        self.manager_id() == Some(user)
    }
}

impl Record for Project {
    const KIND: EntityKind = EntityKind::Project;
    const FILTER_FIELDS: &'static [&'static str] = &[Self::STATUS, Self::CATEGORY, Self::MANAGER];

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_fields(&self) -> SearchFields<'_> {
        smallvec![
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.category_name(),
            self.manager.as_ref().map(|m| m.full_name.as_str()),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<FilterValue> {
        match field {
            Self::STATUS => Some(FilterValue::new(self.status.as_str())),
            // Legacy payloads only carry the category name
            Self::CATEGORY => self
                .category_id()
                .map(FilterValue::from)
                .or_else(|| self.category_name().map(FilterValue::new)),
            Self::MANAGER => self.manager_id().map(FilterValue::from),
            _ => None,
        }
    }

    fn normalize_filter(field: &str, raw: &str) -> FilterValue {
        match (field, raw.parse::<ProjectStatus>()) {
            (Self::STATUS, Ok(status)) => FilterValue::new(status.as_str()),
            _ => FilterValue::new(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn backend_payload_deserializes() {
        let json = r#"{
            "id": 3,
            "managerId": 2,
            "name": "Website Redesign",
            "projectKey": "WEB",
            "description": "Modern UI",
            "categoryId": 5,
            "category": {"id": 5, "name": "Design"},
            "startDate": "2025-01-15T00:00:00.000Z",
            "endDate": "2025-03-01T00:00:00.000Z",
            "status": "in_progress",
            "manager": {"id": 2, "fullName": "João Silva", "avatarUrl": null},
            "_count": {"members": 4}
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.id, EntityId(3));
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.category_name(), Some("Design"));
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(project.member_count(), 4);
        assert!(project.is_managed_by(EntityId(2)));
    }

    #[test]
    fn legacy_payload_deserializes() {
        let json = r#"{
            "id": "1",
            "name": "Website Redesign",
            "description": "Complete redesign",
            "category": "Design",
            "progress": 65,
            "status": "completed",
            "ownerId": "2",
            "memberIds": ["2", "3"],
            "createdAt": "2025-01-15",
            "dueDate": "2025-03-01"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.status, ProjectStatus::Done);
        assert_eq!(project.manager_id, Some(EntityId(2)));
        assert_eq!(project.member_ids, vec![EntityId(2), EntityId(3)]);
        assert_eq!(project.category.as_ref().unwrap().id, None);
        assert_eq!(project.end_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn status_parses_localized_labels() {
        assert_eq!("Finalizado".parse::<ProjectStatus>().unwrap(), ProjectStatus::Done);
        assert_eq!("ACTIVE".parse::<ProjectStatus>().unwrap(), ProjectStatus::Active);
        assert!("archived".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn status_filter_input_accepts_aliases() {
        assert_eq!(
            Project::normalize_filter(Project::STATUS, "completed"),
            FilterValue::new("done")
        );
        assert_eq!(
            Project::normalize_filter(Project::STATUS, "Em andamento"),
            FilterValue::new("in_progress")
        );
        assert_eq!(
            Project::normalize_filter(Project::CATEGORY, "Marketing"),
            FilterValue::new("marketing")
        );
    }

    #[test]
    fn status_round_trips_through_slug() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
    }

    #[test]
    fn category_filter_prefers_id() {
        let project = Project::new(EntityId(1), "p").with_category(Category {
            id: EntityId(9),
            name: "Marketing".into(),
        });
        assert_eq!(
            project.filter_value(Project::CATEGORY),
            Some(FilterValue::new("9"))
        );

        let mut legacy = Project::new(EntityId(2), "q");
        legacy.category = Some(CategoryRef {
            id: None,
            name: "Marketing".into(),
        });
        assert_eq!(
            legacy.filter_value(Project::CATEGORY),
            Some(FilterValue::new("marketing"))
        );
    }

    #[test]
    fn member_ids_merge_both_sources() {
        let mut project = Project::new(EntityId(1), "p");
        project.member_ids = vec![EntityId(2)];
        project.members = vec![
            ProjectMember {
                user: UserSummary::new(EntityId(2), "A"),
                role: None,
            },
            ProjectMember {
                user: UserSummary::new(EntityId(5), "B"),
                role: None,
            },
        ];
        assert_eq!(project.all_member_ids(), vec![EntityId(2), EntityId(5)]);
        assert_eq!(project.member_count(), 2);
    }

    #[test]
    fn missing_search_fields_are_none() {
        let project = Project::new(EntityId(1), "Bare");
        let fields = project.search_fields();
        assert_eq!(fields[0], Some("Bare"));
        assert!(fields[1..].iter().all(Option::is_none));
    }
}
