//! Error types for the derived-view engine

use taskflow_model::EntityKind;

/// Derived-view configuration errors
///
/// The engine performs no I/O; the only failure is asking for a filter the
/// entity kind does not declare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// Filter name is not a categorical field of the entity kind
    #[error("invalid filter name '{name}' for {kind} (expected one of: {expected})")]
    InvalidFilterName {
        /// Entity kind the view is configured for
        kind: EntityKind,
        /// Requested name
        name: String,
        /// Comma-separated declared names
        expected: String,
    },
}

impl ViewError {
    /// Create invalid filter name error
    pub fn invalid_filter_name(kind: EntityKind, name: impl Into<String>, fields: &[&str]) -> Self {
        Self::InvalidFilterName {
            kind,
            name: name.into(),
            expected: fields.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_name_display() {
        let err = ViewError::invalid_filter_name(EntityKind::Task, "colour", &["status", "priority"]);
        assert_eq!(
            err.to_string(),
            "invalid filter name 'colour' for task (expected one of: status, priority)"
        );
    }
}
