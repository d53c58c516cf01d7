use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::fields::Field;

/// Category values offered to users. Advisory only; any category passing
/// the length rule is accepted.
pub const SUGGESTED_CATEGORIES: [&str; 10] = [
    "Technology",
    "Science",
    "Medicine",
    "Engineering",
    "Social Sciences",
    "Humanities",
    "Business",
    "Education",
    "Environment",
    "Other",
];

/// A catalogued research paper.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub keywords: Option<String>,
    pub publication_date: NaiveDate,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub methodology: Option<String>,
    pub results: Option<String>,
    pub conclusions: Option<String>,
    pub journal: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResearchRecord {
    /// Text form of a field, as written to CSV and compared on import.
    #[must_use]
    pub fn value(&self, field: Field) -> Option<String> {
        match field {
            Field::Title => Some(self.title.clone()),
            Field::Author => Some(self.author.clone()),
            Field::Category => Some(self.category.clone()),
            Field::PublicationDate => Some(self.publication_date.format("%Y-%m-%d").to_string()),
            Field::Keywords => self.keywords.clone(),
            Field::Abstract => self.abstract_text.clone(),
            Field::Methodology => self.methodology.clone(),
            Field::Results => self.results.clone(),
            Field::Conclusions => self.conclusions.clone(),
            Field::Journal => self.journal.clone(),
            Field::Volume => self.volume.clone(),
            Field::Issue => self.issue.clone(),
            Field::Pages => self.pages.clone(),
            Field::Doi => self.doi.clone(),
            Field::Url => self.url.clone(),
            Field::Notes => self.notes.clone(),
        }
    }
}

/// A validated record ready for insertion.
///
/// Only `validation::Validator` produces these (via `NewRecord::from_payload`),
/// so every value already satisfies the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub author: String,
    pub category: String,
    pub keywords: Option<String>,
    pub publication_date: NaiveDate,
    pub abstract_text: Option<String>,
    pub methodology: Option<String>,
    pub results: Option<String>,
    pub conclusions: Option<String>,
    pub journal: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl NewRecord {
    /// Text form of a field, in the same encoding as `ResearchRecord::value`.
    #[must_use]
    pub fn value(&self, field: Field) -> Option<String> {
        match field {
            Field::Title => Some(self.title.clone()),
            Field::Author => Some(self.author.clone()),
            Field::Category => Some(self.category.clone()),
            Field::PublicationDate => Some(self.publication_date.format("%Y-%m-%d").to_string()),
            Field::Keywords => self.keywords.clone(),
            Field::Abstract => self.abstract_text.clone(),
            Field::Methodology => self.methodology.clone(),
            Field::Results => self.results.clone(),
            Field::Conclusions => self.conclusions.clone(),
            Field::Journal => self.journal.clone(),
            Field::Volume => self.volume.clone(),
            Field::Issue => self.issue.clone(),
            Field::Pages => self.pages.clone(),
            Field::Doi => self.doi.clone(),
            Field::Url => self.url.clone(),
            Field::Notes => self.notes.clone(),
        }
    }

    /// Attach system-managed attributes, producing the persisted form.
    #[must_use]
    pub fn into_record(self, id: i64, now: DateTime<Utc>) -> ResearchRecord {
        ResearchRecord {
            id,
            title: self.title,
            author: self.author,
            category: self.category,
            keywords: self.keywords,
            publication_date: self.publication_date,
            abstract_text: self.abstract_text,
            methodology: self.methodology,
            results: self.results,
            conclusions: self.conclusions,
            journal: self.journal,
            volume: self.volume,
            issue: self.issue,
            pages: self.pages,
            doi: self.doi,
            url: self.url,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}
