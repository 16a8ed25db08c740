//! The [`Record`] trait: what the view engine needs to know about an entity
//!
//! Every entity kind declares, once and statically, which of its text fields
//! participate in free-text search and which discrete fields can be used as
//! equality filters. Filter values are compared in their normalized
//! [`FilterValue`] form only.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Searchable text fields of one entity; `None` marks a missing field
pub type SearchFields<'a> = SmallVec<[Option<&'a str>; 4]>;

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A project
    Project,
    /// A task inside a project
    Task,
    /// A user account
    User,
    /// A comment on a task
    Comment,
    /// A file attached to a task
    Attachment,
}

impl EntityKind {
    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::User => "user",
            Self::Comment => "comment",
            Self::Attachment => "attachment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized value of a categorical field
///
/// Normalization trims surrounding whitespace and lowercases. Anything that
/// parses as an unsigned integer is stored in canonical decimal form, so an
/// identifier coming from a select box (`"07"`) matches [`EntityId`] `7`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterValue(String);

impl FilterValue {
    /// Normalize a raw value
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        match trimmed.parse::<u64>() {
            Ok(n) => Self(n.to_string()),
            Err(_) => Self(trimmed.to_lowercase()),
        }
    }

    /// Normalized string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<EntityId> for FilterValue {
    fn from(id: EntityId) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FilterValue {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entity that can live in a derived view
pub trait Record: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Kind tag
    const KIND: EntityKind;

    /// Names of the categorical fields accepted by [`Record::filter_value`]
    const FILTER_FIELDS: &'static [&'static str];

    /// Stable unique identifier
    fn id(&self) -> EntityId;

    /// Text fields eligible for free-text search
    fn search_fields(&self) -> SearchFields<'_>;

    /// Normalized value of a categorical field, `None` when unset
    ///
    /// Only called with names listed in [`Record::FILTER_FIELDS`].
    fn filter_value(&self, field: &str) -> Option<FilterValue>;

    /// Map a raw control value for `field` onto the form [`Record::filter_value`] yields
    ///
    /// Kinds whose fields accept labels or aliases override this; the default
    /// only normalizes.
    fn normalize_filter(field: &str, raw: &str) -> FilterValue {
        let _ = field;
        FilterValue::new(raw)
    }
}
