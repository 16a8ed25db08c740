//! Filter schema and filter state
//!
//! A [`FilterSchema`] is fixed per entity kind. Names are resolved into
//! [`FilterKey`]s once, when a view is configured; from then on setting a
//! filter cannot fail.

use crate::error::ViewError;
use std::fmt;
use std::marker::PhantomData;
use taskflow_model::{EntityId, EntityKind, FilterValue, Record};

/// Sentinel accepted from filter controls meaning "no constraint"
pub const ALL: &str = "all";

/// Value of one categorical filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    /// No constraint
    #[default]
    Any,
    /// Field must equal this value
    Only(FilterValue),
}

impl Selection {
    /// Parse a raw control value; `all` (any case) and the empty string mean [`Selection::Any`]
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Self::Any
        } else {
            Self::Only(FilterValue::new(trimmed))
        }
    }

    /// Parse a raw control value for `field` of `R`, accepting the kind's labels and aliases
    #[must_use]
    pub fn for_field<R: Record>(field: &str, raw: &str) -> Self {
        match Self::parse(raw) {
            Self::Any => Self::Any,
            Self::Only(_) => Self::Only(R::normalize_filter(field, raw.trim())),
        }
    }

    /// Whether this selection constrains anything
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    /// Whether `value` passes this selection
    #[inline]
    #[must_use]
    pub fn admits(&self, value: Option<&FilterValue>) -> bool {
        match self {
            Self::Any => true,
            Self::Only(expected) => value == Some(expected),
        }
    }
}

impl From<FilterValue> for Selection {
    fn from(value: FilterValue) -> Self {
        Self::Only(value)
    }
}

impl From<EntityId> for Selection {
    fn from(id: EntityId) -> Self {
        Self::Only(id.into())
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(ALL),
            Self::Only(value) => write!(f, "{value}"),
        }
    }
}

/// Resolved handle to one categorical field of `R`
pub struct FilterKey<R> {
    index: usize,
    name: &'static str,
    _record: PhantomData<fn() -> R>,
}

impl<R> FilterKey<R> {
    /// Field name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Position in the schema
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<R> Clone for FilterKey<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FilterKey<R> {}

impl<R> PartialEq for FilterKey<R> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<R> Eq for FilterKey<R> {}

impl<R> fmt::Debug for FilterKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterKey")
            .field("index", &self.index)
            .field("name", &self.name)
            .finish()
    }
}

/// Declared categorical fields of an entity kind
pub struct FilterSchema<R> {
    fields: &'static [&'static str],
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> FilterSchema<R> {
    /// Schema declared by `R`
    #[inline]
    #[must_use]
    pub fn for_record() -> Self {
        Self {
            fields: R::FILTER_FIELDS,
            _record: PhantomData,
        }
    }

    /// Entity kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        R::KIND
    }

    /// Declared field names, in schema order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Resolve a field name
    ///
    /// # Errors
    /// Returns [`ViewError::InvalidFilterName`] if `name` is not declared
    pub fn key(&self, name: &str) -> Result<FilterKey<R>, ViewError> {
        self.fields
            .iter()
            .position(|field| *field == name)
            .map(|index| FilterKey {
                index,
                name: self.fields[index],
                _record: PhantomData,
            })
            .ok_or_else(|| ViewError::invalid_filter_name(R::KIND, name, self.fields))
    }

    /// Keys for every declared field
    pub fn keys(&self) -> impl Iterator<Item = FilterKey<R>> + '_ {
        self.fields.iter().enumerate().map(|(index, name)| FilterKey {
            index,
            name,
            _record: PhantomData,
        })
    }
}

impl<R> Clone for FilterSchema<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields,
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for FilterSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSchema").field("fields", &self.fields).finish()
    }
}

/// Current free-text query and categorical selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    needle: String,
    selections: Vec<Selection>,
}

impl FilterState {
    /// Unconstrained state for a schema
    #[must_use]
    pub fn cleared<R: Record>(schema: &FilterSchema<R>) -> Self {
        Self {
            query: String::new(),
            needle: String::new(),
            selections: vec![Selection::Any; schema.fields().len()],
        }
    }

    /// Query as entered
    #[inline]
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Selection for a field
    #[inline]
    #[must_use]
    pub fn selection<R>(&self, key: FilterKey<R>) -> &Selection {
        &self.selections[key.index]
    }

    /// Whether any constraint is active
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.needle.is_empty() || self.selections.iter().any(Selection::is_active)
    }

    pub(crate) fn set_query(&mut self, text: &str) -> bool {
        if self.query == text {
            return false;
        }
        self.query = text.to_string();
        self.needle = text.to_lowercase();
        true
    }

    pub(crate) fn set_selection<R>(&mut self, key: FilterKey<R>, selection: Selection) -> bool {
        let slot = &mut self.selections[key.index];
        if *slot == selection {
            return false;
        }
        *slot = selection;
        true
    }

    pub(crate) fn clear(&mut self) -> bool {
        let changed = self.is_active();
        self.query.clear();
        self.needle.clear();
        self.selections.fill(Selection::Any);
        changed
    }

    /// Whether `record` satisfies the query and every active selection
    #[must_use]
    pub fn matches<R: Record>(&self, schema: &FilterSchema<R>, record: &R) -> bool {
        self.matches_query(record) && self.matches_selections(schema, record)
    }

    // Missing fields behave as empty strings: they never match a non-empty needle
    fn matches_query<R: Record>(&self, record: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&self.needle))
    }

    fn matches_selections<R: Record>(&self, schema: &FilterSchema<R>, record: &R) -> bool {
        self.selections
            .iter()
            .zip(schema.fields())
            .filter(|(selection, _)| selection.is_active())
            .all(|(selection, field)| selection.admits(record.filter_value(field).as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_model::{Priority, Task, TaskStatus};

    fn schema() -> FilterSchema<Task> {
        FilterSchema::for_record()
    }

    #[test]
    fn selection_parse_recognizes_sentinel() {
        assert_eq!(Selection::parse("all"), Selection::Any);
        assert_eq!(Selection::parse(" ALL "), Selection::Any);
        assert_eq!(Selection::parse(""), Selection::Any);
        assert_eq!(Selection::parse("Active"), Selection::Only(FilterValue::new("active")));
    }

    #[test]
    fn field_selection_maps_labels_to_slugs() {
        assert_eq!(
            Selection::for_field::<Task>(Task::STATUS, " A fazer "),
            Selection::Only(FilterValue::new("todo"))
        );
        assert_eq!(
            Selection::for_field::<Task>(Task::PRIORITY, "HIGH"),
            Selection::Only(Priority::High.as_str().into())
        );
        assert_eq!(Selection::for_field::<Task>(Task::STATUS, "All"), Selection::Any);
    }

    #[test]
    fn schema_rejects_unknown_name() {
        let err = schema().key("colour").unwrap_err();
        assert!(matches!(err, ViewError::InvalidFilterName { ref name, .. } if name == "colour"));
    }

    #[test]
    fn schema_resolves_declared_names() {
        let key = schema().key(Task::PRIORITY).unwrap();
        assert_eq!(key.name(), "priority");
        assert_eq!(schema().keys().count(), Task::FILTER_FIELDS.len());
    }

    #[test]
    fn query_is_case_insensitive() {
        let schema = schema();
        let mut state = FilterState::cleared(&schema);
        state.set_query("HOMEPAGE");
        let task = Task::new(EntityId(1), "Design homepage mockup");
        assert!(state.matches(&schema, &task));
    }

    #[test]
    fn missing_description_never_matches_query() {
        let schema = schema();
        let mut state = FilterState::cleared(&schema);
        state.set_query("mockup");
        let task = Task::new(EntityId(1), "Unrelated");
        assert!(!state.matches(&schema, &task));
    }

    #[test]
    fn selections_are_anded() {
        let schema = schema();
        let mut state = FilterState::cleared(&schema);
        state.set_selection(schema.key(Task::STATUS).unwrap(), Selection::parse("todo"));
        state.set_selection(schema.key(Task::PRIORITY).unwrap(), Selection::parse("high"));

        let both = Task::new(EntityId(1), "a").with_priority(Priority::High);
        let one = Task::new(EntityId(2), "b")
            .with_status(TaskStatus::Completed)
            .with_priority(Priority::High);

        assert!(state.matches(&schema, &both));
        assert!(!state.matches(&schema, &one));
    }

    #[test]
    fn setters_report_changes_only() {
        let schema = schema();
        let mut state = FilterState::cleared(&schema);
        assert!(!state.clear());
        assert!(state.set_query("x"));
        assert!(!state.set_query("x"));
        let key = schema.key(Task::STATUS).unwrap();
        assert!(state.set_selection(key, Selection::parse("todo")));
        assert!(!state.set_selection(key, Selection::parse("TODO")));
        assert!(state.clear());
        assert!(!state.is_active());
    }
}
