//! Calendar date handling
//!
//! The backend sends full ISO timestamps (`2025-01-15T00:00:00.000Z`) for
//! fields that are semantically calendar days. Only the date part is kept.

use crate::error::ModelError;
use chrono::NaiveDate;

/// Parse `YYYY-MM-DD`, ignoring any `T...` time suffix
///
/// # Errors
/// Returns [`ModelError::InvalidDate`] when the date part is malformed
pub fn parse_date(raw: &str) -> Result<NaiveDate, ModelError> {
    let day = raw.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| ModelError::InvalidDate(raw.to_string()))
}

/// Day-first display form (`15-01-2025`)
#[must_use]
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Serde adapter for optional calendar dates
pub mod optional {
    use super::parse_date;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as `YYYY-MM-DD` or null
    ///
    /// # Errors
    /// Propagates serializer errors
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from null, an empty string, a date or a timestamp
    ///
    /// # Errors
    /// Fails when a non-empty string has no valid date part
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) if !s.trim().is_empty() => parse_date(&s).map(Some).map_err(de::Error::custom),
            _ => Ok(None),
        }
    }
}
