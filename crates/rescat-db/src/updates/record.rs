//! Research record update builder.

use chrono::NaiveDate;
use rescat_core::errors::ValidationErrors;
use rescat_core::fields::Field;
use rescat_core::payload::RecordPayload;
use rescat_core::validation::{DATE_FORMAT, Validator};

use crate::helpers::text_or_null;

/// A partial update. `None` leaves a column unchanged; for optional columns
/// `Some(None)` clears it.
///
/// Required columns can only be replaced, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub keywords: Option<Option<String>>,
    pub abstract_text: Option<Option<String>>,
    pub methodology: Option<Option<String>>,
    pub results: Option<Option<String>>,
    pub conclusions: Option<Option<String>>,
    pub journal: Option<Option<String>>,
    pub volume: Option<Option<String>>,
    pub issue: Option<Option<String>>,
    pub pages: Option<Option<String>>,
    pub doi: Option<Option<String>>,
    pub url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl RecordUpdate {
    /// Validate the fields present in an update payload.
    ///
    /// Absent keys stay unchanged. An explicit `null` or blank value on a
    /// required field is a violation; on an optional field it clears the
    /// column.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` listing every failing field.
    pub fn from_payload(mut payload: RecordPayload) -> Result<Self, ValidationErrors> {
        let mut v = Validator::new();
        let mut update = Self::default();

        if let Some(value) = payload.title.take() {
            update.title = v.required_text(Field::Title, value);
        }
        if let Some(value) = payload.author.take() {
            update.author = v.required_text(Field::Author, value);
        }
        if let Some(value) = payload.category.take() {
            update.category = v.required_text(Field::Category, value);
        }
        if let Some(value) = payload.publication_date.take() {
            update.publication_date = v.required_date(Field::PublicationDate, value);
        }
        for field in Field::ALL.into_iter().filter(|f| !f.is_required()) {
            if let (Some(value), Some(slot)) =
                (payload.slot_mut(field).take(), update.optional_slot_mut(field))
            {
                *slot = Some(v.optional_text(field, value));
            }
        }

        v.finish()?;
        Ok(update)
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.category.is_none()
            && self.publication_date.is_none()
            && Field::ALL
                .into_iter()
                .filter(|f| !f.is_required())
                .all(|f| matches!(self.optional_slot(f), None | Some(None)))
    }

    /// Column assignments in `Field` order.
    #[must_use]
    pub fn assignments(&self) -> Vec<(Field, libsql::Value)> {
        let mut out = Vec::new();
        for (field, value) in [
            (Field::Title, &self.title),
            (Field::Author, &self.author),
            (Field::Category, &self.category),
        ] {
            if let Some(value) = value {
                out.push((field, libsql::Value::Text(value.clone())));
            }
        }
        if let Some(date) = self.publication_date {
            out.push((
                Field::PublicationDate,
                libsql::Value::Text(date.format(DATE_FORMAT).to_string()),
            ));
        }
        for field in Field::ALL.into_iter().filter(|f| !f.is_required()) {
            if let Some(Some(value)) = self.optional_slot(field) {
                out.push((field, text_or_null(value.clone())));
            }
        }
        out.sort_by_key(|(field, _)| *field);
        out
    }

    const fn optional_slot(&self, field: Field) -> Option<&Option<Option<String>>> {
        match field {
            Field::Keywords => Some(&self.keywords),
            Field::Abstract => Some(&self.abstract_text),
            Field::Methodology => Some(&self.methodology),
            Field::Results => Some(&self.results),
            Field::Conclusions => Some(&self.conclusions),
            Field::Journal => Some(&self.journal),
            Field::Volume => Some(&self.volume),
            Field::Issue => Some(&self.issue),
            Field::Pages => Some(&self.pages),
            Field::Doi => Some(&self.doi),
            Field::Url => Some(&self.url),
            Field::Notes => Some(&self.notes),
            Field::Title | Field::Author | Field::Category | Field::PublicationDate => None,
        }
    }

    fn optional_slot_mut(&mut self, field: Field) -> Option<&mut Option<Option<String>>> {
        match field {
            Field::Keywords => Some(&mut self.keywords),
            Field::Abstract => Some(&mut self.abstract_text),
            Field::Methodology => Some(&mut self.methodology),
            Field::Results => Some(&mut self.results),
            Field::Conclusions => Some(&mut self.conclusions),
            Field::Journal => Some(&mut self.journal),
            Field::Volume => Some(&mut self.volume),
            Field::Issue => Some(&mut self.issue),
            Field::Pages => Some(&mut self.pages),
            Field::Doi => Some(&mut self.doi),
            Field::Url => Some(&mut self.url),
            Field::Notes => Some(&mut self.notes),
            Field::Title | Field::Author | Field::Category | Field::PublicationDate => None,
        }
    }
}

/// Builds a `RecordUpdate` without going through payload validation.
pub struct RecordUpdateBuilder(RecordUpdate);

impl RecordUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(RecordUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.0.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.0.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn publication_date(mut self, date: NaiveDate) -> Self {
        self.0.publication_date = Some(date);
        self
    }

    /// Set (`Some`) or clear (`None`) an optional field. Ignored for required fields.
    #[must_use]
    pub fn optional(mut self, field: Field, value: Option<String>) -> Self {
        if let Some(slot) = self.0.optional_slot_mut(field) {
            *slot = Some(value);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> RecordUpdate {
        self.0
    }
}

impl Default for RecordUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
