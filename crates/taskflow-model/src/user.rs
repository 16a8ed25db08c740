//! Users and roles

use crate::id::EntityId;
use crate::record::{EntityKind, FilterValue, Record, SearchFields};
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::smallvec;
use std::fmt;

/// Account role
///
/// Backend role names are free-form; the three known ones are recognized
/// in their English, short and localized spellings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full access to user administration
    Administrator,
    /// Manages projects
    Manager,
    /// Regular team member
    Member,
    /// Any other backend role
    Other(String),
}

impl Role {
    /// Canonical backend name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Administrator => "Administrator",
            Self::Manager => "Manager",
            Self::Member => "Team Member",
            Self::Other(name) => name,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Administrator => "Administrador",
            Self::Manager => "Gerente",
            Self::Member => "Membro",
            Self::Other(name) => name,
        }
    }

    /// Filter slug (`administrator`, `manager`, `member`, or the lowercased name)
    #[must_use]
    pub fn slug(&self) -> FilterValue {
        match self {
            Self::Administrator => FilterValue::new("administrator"),
            Self::Manager => FilterValue::new("manager"),
            Self::Member => FilterValue::new("member"),
            Self::Other(name) => FilterValue::new(name),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Administrator => 3,
            Self::Manager => 2,
            Self::Member => 1,
            Self::Other(_) => 0,
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "administrator" | "admin" | "administrador" => Self::Administrator,
            "manager" | "gerente" => Self::Manager,
            "team member" | "member" | "membro" | "user" => Self::Member,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compact user reference embedded in other entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User id
    pub id: EntityId,
    /// Full name
    pub full_name: String,
    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserSummary {
    /// Create summary without avatar
    #[must_use]
    pub fn new(id: EntityId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            avatar_url: None,
        }
    }
}

/// A user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    pub id: EntityId,
    /// Full name
    pub full_name: String,
    /// Login email
    pub email: String,
    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Job title
    #[serde(default)]
    pub position: Option<String>,
    /// Assigned roles
    #[serde(default, alias = "role", deserialize_with = "one_or_many")]
    pub roles: Vec<Role>,
}

impl User {
    /// Role filter field
    pub const ROLE: &'static str = "role";

    /// Create user with no roles
    #[must_use]
    pub fn new(id: EntityId, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: email.into(),
            avatar_url: None,
            position: None,
            roles: Vec::new(),
        }
    }

    /// With role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Highest-ranked role; users without roles count as members
    #[must_use]
    pub fn primary_role(&self) -> Role {
        self.roles
            .iter()
            .max_by_key(|r| r.rank())
            .cloned()
            .unwrap_or(Role::Member)
    }

    /// Whether the user holds the administrator role
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Administrator)
    }

    /// Summary view of this user
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            full_name: self.full_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

impl Record for User {
    const KIND: EntityKind = EntityKind::User;
    const FILTER_FIELDS: &'static [&'static str] = &[Self::ROLE];

    fn id(&self) -> EntityId {
        self.id
    }

    fn search_fields(&self) -> SearchFields<'_> {
        let role = self.roles.iter().max_by_key(|r| r.rank());
        smallvec![
            Some(self.full_name.as_str()),
            Some(self.email.as_str()),
            role.map(Role::label),
            role.map(Role::as_str),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<FilterValue> {
        match field {
            Self::ROLE => Some(self.primary_role().slug()),
            _ => None,
        }
    }

    fn normalize_filter(field: &str, raw: &str) -> FilterValue {
        match field {
            Self::ROLE => Role::from(raw).slug(),
            _ => FilterValue::new(raw),
        }
    }
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Role>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Role),
        Many(Vec<Role>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(role)) => vec![role],
        Some(OneOrMany::Many(roles)) => roles,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn session_payload_deserializes() {
        let json = r#"{
            "id": 1,
            "fullName": "Admin User",
            "email": "admin@taskflow.com",
            "avatarUrl": "/admin-avatar.png",
            "position": "CTO",
            "roles": ["Administrator", "Team Member"]
        }"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert!(user.is_admin());
        assert_eq!(user.primary_role(), Role::Administrator);
        assert_eq!(user.roles.len(), 2);
    }

    #[test]
    fn single_role_field_is_accepted() {
        let json = r#"{"id": "3", "fullName": "Ana", "email": "ana@x.com", "role": "manager"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.roles, vec![Role::Manager]);
        assert_eq!(user.filter_value(User::ROLE), Some(FilterValue::new("manager")));
    }

    #[test]
    fn unknown_role_is_preserved() {
        let role = Role::from("Auditor");
        assert_eq!(role, Role::Other("Auditor".into()));
        assert_eq!(String::from(role), "Auditor");
    }

    #[test]
    fn role_filter_input_accepts_labels() {
        assert_eq!(User::normalize_filter(User::ROLE, "Team Member"), FilterValue::new("member"));
        assert_eq!(User::normalize_filter(User::ROLE, "Gerente"), FilterValue::new("manager"));
        assert_eq!(User::normalize_filter(User::ROLE, "Auditor"), FilterValue::new("auditor"));
    }

    #[test]
    fn user_without_roles_is_member() {
        let user = User::new(EntityId(4), "Pedro", "pedro@x.com");
        assert_eq!(user.primary_role(), Role::Member);
        assert!(!user.is_admin());
    }

    #[test]
    fn search_fields_include_role_label() {
        let user = User::new(EntityId(1), "Carlos", "c@x.com").with_role(Role::Administrator);
        let fields = user.search_fields();
        assert!(fields.contains(&Some("Administrador")));
    }
}
