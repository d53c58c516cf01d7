//! Cross-cutting error types for rescat.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ApiError`) are defined in
//! their respective crates. The types here are the ones every layer needs to
//! pass through untouched: field validation failures and CSV transfer errors.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::fields::Field;

/// Message for a required field that is absent, null or blank.
pub const BLANK: &str = "can't be blank";

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    /// Subject-prefixed message, e.g. `"Title is too short (minimum is 5 characters)"`.
    #[must_use]
    pub fn full_message(&self) -> String {
        format!("{} {}", self.field.human_name(), self.message)
    }
}

/// Every field rule violated by a payload.
///
/// Validation never stops at the first failure; callers receive the whole
/// list and render it both as full messages and as a per-field map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages recorded against a single field.
    #[must_use]
    pub fn on(&self, field: Field) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Fields with at least one violation, without duplicates.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self.errors.iter().map(|e| e.field).collect();
        fields.sort_unstable();
        fields.dedup();
        fields
    }

    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldError::full_message).collect()
    }

    /// Messages grouped by wire key.
    #[must_use]
    pub fn details(&self) -> BTreeMap<String, Vec<String>> {
        let mut details: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            details
                .entry(error.field.as_str().to_string())
                .or_default()
                .push(error.message.clone());
        }
        details
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {}", self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors reading or writing the CSV transfer format.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The header row is absent or names none of the record fields.
    #[error("CSV header does not contain any known column")]
    UnknownHeader,

    /// Underlying CSV reader/writer error (includes I/O).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_every_field_error() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::Title, "is too short (minimum is 5 characters)");
        errors.add(Field::Author, BLANK);
        errors.add(Field::PublicationDate, BLANK);

        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.full_messages(),
            vec![
                "Title is too short (minimum is 5 characters)",
                "Author can't be blank",
                "Publication date can't be blank",
            ]
        );
        assert_eq!(
            errors.fields(),
            vec![Field::Title, Field::Author, Field::PublicationDate]
        );
    }

    #[test]
    fn details_group_by_wire_key() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::Title, BLANK);
        errors.add(Field::Title, "is too short (minimum is 5 characters)");

        let details = errors.details();
        assert_eq!(details.len(), 1);
        assert_eq!(details["title"].len(), 2);
        assert_eq!(errors.on(Field::Title)[0], BLANK);
    }

    #[test]
    fn display_joins_full_messages() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::Category, BLANK);
        assert_eq!(errors.to_string(), "Validation failed: Category can't be blank");
    }
}
