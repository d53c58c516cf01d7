//! Field-level validation.
//!
//! `Validator` accumulates violations instead of returning on the first one,
//! so a caller always sees the complete list. Text is trimmed before checks
//! and lengths count Unicode scalar values.

use chrono::NaiveDate;
use thiserror::Error;

use crate::entities::NewRecord;
use crate::errors::{BLANK, ValidationErrors};
use crate::fields::Field;
use crate::payload::RecordPayload;

/// Accepted `publication_date` format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date that is not exactly `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a date in YYYY-MM-DD format, got '{0}'")]
pub struct DateFormatError(pub String);

/// Parse a `YYYY-MM-DD` date after trimming.
///
/// Dates are stored as text and compared lexically, so only the fixed-width
/// form is accepted: signed or five-digit years and unpadded months or days
/// are rejected even though chrono would read them.
///
/// # Errors
///
/// Returns `DateFormatError` for anything else, including impossible
/// calendar dates.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateFormatError> {
    let text = text.trim();
    let fixed_width = text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !fixed_width {
        return Err(DateFormatError(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| DateFormatError(text.to_string()))
}

/// Accumulates violations across many field checks.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a field that must be present and non-blank.
    ///
    /// Returns the trimmed value, or `None` after recording a violation.
    pub fn required_text(&mut self, field: Field, value: Option<String>) -> Option<String> {
        let Some(text) = non_blank(value) else {
            self.errors.add(field, BLANK);
            return None;
        };
        self.check_length(field, text)
    }

    /// Check a field that may be absent. Blank counts as absent.
    ///
    /// Returns `None` both for absent values and for values that violated a
    /// rule; `finish` tells the two apart.
    pub fn optional_text(&mut self, field: Field, value: Option<String>) -> Option<String> {
        non_blank(value).and_then(|text| self.check_length(field, text))
    }

    /// Check a required `YYYY-MM-DD` date.
    pub fn required_date(&mut self, field: Field, value: Option<String>) -> Option<NaiveDate> {
        let Some(text) = non_blank(value) else {
            self.errors.add(field, BLANK);
            return None;
        };
        match parse_date(&text) {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors
                    .add(field, "is not a valid date (expected YYYY-MM-DD)");
                None
            }
        }
    }

    fn check_length(&mut self, field: Field, text: String) -> Option<String> {
        let Some(bounds) = field.length_bounds() else {
            return Some(text);
        };
        let len = text.chars().count();
        if len < bounds.min {
            self.errors.add(
                field,
                format!("is too short (minimum is {} characters)", bounds.min),
            );
            return None;
        }
        if len > bounds.max {
            self.errors.add(
                field,
                format!("is too long (maximum is {} characters)", bounds.max),
            );
            return None;
        }
        Some(text)
    }

    /// Consume the validator, returning every recorded violation.
    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    /// `Ok(())` when no rule was violated.
    ///
    /// # Errors
    ///
    /// Returns every recorded violation.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

impl NewRecord {
    /// Validate a create payload. Absent and `null` keys are treated alike.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` listing every failing field.
    pub fn from_payload(payload: RecordPayload) -> Result<Self, ValidationErrors> {
        let mut v = Validator::new();

        let title = v.required_text(Field::Title, payload.title.flatten());
        let author = v.required_text(Field::Author, payload.author.flatten());
        let category = v.required_text(Field::Category, payload.category.flatten());
        let publication_date =
            v.required_date(Field::PublicationDate, payload.publication_date.flatten());
        let keywords = v.optional_text(Field::Keywords, payload.keywords.flatten());
        let abstract_text = v.optional_text(Field::Abstract, payload.abstract_text.flatten());
        let methodology = v.optional_text(Field::Methodology, payload.methodology.flatten());
        let results = v.optional_text(Field::Results, payload.results.flatten());
        let conclusions = v.optional_text(Field::Conclusions, payload.conclusions.flatten());
        let journal = v.optional_text(Field::Journal, payload.journal.flatten());
        let volume = v.optional_text(Field::Volume, payload.volume.flatten());
        let issue = v.optional_text(Field::Issue, payload.issue.flatten());
        let pages = v.optional_text(Field::Pages, payload.pages.flatten());
        let doi = v.optional_text(Field::Doi, payload.doi.flatten());
        let url = v.optional_text(Field::Url, payload.url.flatten());
        let notes = v.optional_text(Field::Notes, payload.notes.flatten());

        let errors = v.into_errors();
        match (title, author, category, publication_date) {
            (Some(title), Some(author), Some(category), Some(publication_date))
                if errors.is_empty() =>
            {
                Ok(Self {
                    title,
                    author,
                    category,
                    keywords,
                    publication_date,
                    abstract_text,
                    methodology,
                    results,
                    conclusions,
                    journal,
                    volume,
                    issue,
                    pages,
                    doi,
                    url,
                    notes,
                })
            }
            _ => Err(errors),
        }
    }
}
