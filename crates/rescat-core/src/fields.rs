//! The user-editable attributes of a research record.
//!
//! `Field` drives validation rules, column names, CSV headers and the
//! dynamic UPDATE builder, so adding an attribute means adding a variant here
//! and letting the exhaustive matches point at everything else.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An editable attribute of a `ResearchRecord`.
///
/// System-managed attributes (`id`, `created_at`, `updated_at`) are not fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Author,
    Category,
    Keywords,
    PublicationDate,
    Abstract,
    Methodology,
    Results,
    Conclusions,
    Journal,
    Volume,
    Issue,
    Pages,
    Doi,
    Url,
    Notes,
}

/// Inclusive character-count bounds for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Title,
        Self::Author,
        Self::Category,
        Self::Keywords,
        Self::PublicationDate,
        Self::Abstract,
        Self::Methodology,
        Self::Results,
        Self::Conclusions,
        Self::Journal,
        Self::Volume,
        Self::Issue,
        Self::Pages,
        Self::Doi,
        Self::Url,
        Self::Notes,
    ];

    /// Wire key and SQL column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Category => "category",
            Self::Keywords => "keywords",
            Self::PublicationDate => "publication_date",
            Self::Abstract => "abstract",
            Self::Methodology => "methodology",
            Self::Results => "results",
            Self::Conclusions => "conclusions",
            Self::Journal => "journal",
            Self::Volume => "volume",
            Self::Issue => "issue",
            Self::Pages => "pages",
            Self::Doi => "doi",
            Self::Url => "url",
            Self::Notes => "notes",
        }
    }

    /// Column header used by the CSV export.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Category => "Category",
            Self::Keywords => "Keywords",
            Self::PublicationDate => "Publication Date",
            Self::Abstract => "Abstract",
            Self::Methodology => "Methodology",
            Self::Results => "Results",
            Self::Conclusions => "Conclusions",
            Self::Journal => "Journal",
            Self::Volume => "Volume",
            Self::Issue => "Issue",
            Self::Pages => "Pages",
            Self::Doi => "DOI",
            Self::Url => "URL",
            Self::Notes => "Notes",
        }
    }

    /// Sentence-case name used as the subject of validation messages.
    #[must_use]
    pub const fn human_name(self) -> &'static str {
        match self {
            Self::PublicationDate => "Publication date",
            other => other.label(),
        }
    }

    /// Whether a persisted record must always carry this field.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(
            self,
            Self::Title | Self::Author | Self::Category | Self::PublicationDate
        )
    }

    /// Length bounds for text fields. `None` for the date field.
    #[must_use]
    pub const fn length_bounds(self) -> Option<LengthBounds> {
        let (min, max) = match self {
            Self::Title => (5, 255),
            Self::Author => (2, 100),
            Self::Category => (1, 50),
            Self::Keywords => (0, 500),
            Self::PublicationDate => return None,
            Self::Abstract | Self::Methodology | Self::Results | Self::Conclusions => (0, 10_000),
            Self::Notes => (0, 5_000),
            Self::Journal | Self::Doi => (0, 255),
            Self::Volume | Self::Issue | Self::Pages => (0, 50),
            Self::Url => (0, 2_048),
        };
        Some(LengthBounds { min, max })
    }

    /// Resolve a CSV header or wire key to a field.
    ///
    /// Matches the snake_case key or the export label, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL.into_iter().find(|field| {
            header.eq_ignore_ascii_case(field.as_str()) || header.eq_ignore_ascii_case(field.label())
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
