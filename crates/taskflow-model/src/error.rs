//! Error types for the entity schema

/// Errors raised while normalizing values at the schema boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Identifier is neither an unsigned integer nor a numeric string
    #[error("invalid identifier: '{0}'")]
    InvalidId(String),

    /// Value does not name any variant of a wire enum
    #[error("unknown {kind}: '{value}'")]
    UnknownVariant {
        /// Enum being parsed (e.g. `project status`)
        kind: &'static str,
        /// Offending raw value
        value: String,
    },

    /// Date is not in `YYYY-MM-DD` form (optionally followed by a time part)
    #[error("invalid date: '{0}'")]
    InvalidDate(String),
}

impl ModelError {
    /// Create unknown variant error
    #[inline]
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}
