//! JSON response types returned by the HTTP API.
//!
//! The server serializes these and the client deserializes them, so both
//! sides share one definition of the wire shape.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ResearchRecord;
use crate::errors::ValidationErrors;
use crate::query::Page;

/// Response from `GET /research_data`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ListResponse {
    pub data: Vec<ResearchRecord>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub per_page: u32,
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ListMeta {
    pub total_count: u64,
}

impl From<Page<ResearchRecord>> for ListResponse {
    fn from(page: Page<ResearchRecord>) -> Self {
        Self {
            meta: ListMeta {
                total_count: page.total_count,
            },
            data: page.data,
            total_count: page.total_count,
            total_pages: page.total_pages,
            current_page: page.current_page,
            per_page: page.per_page,
        }
    }
}

/// Response from `GET /research_data/analytics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Analytics {
    pub total_count: u64,
    /// Category value to record count.
    pub by_category: BTreeMap<String, u64>,
    /// `YYYY-MM` of `publication_date` to record count.
    pub by_month: BTreeMap<String, u64>,
    /// Records created within the rolling 30-day window.
    pub recent_additions: u64,
}

/// Response from `GET /research_data/categories`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoriesResponse {
    /// Distinct categories currently in use, sorted.
    pub categories: Vec<String>,
    /// Advisory suggestion list offered to users.
    pub suggested: Vec<String>,
}

/// One CSV row that could not be imported.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportRowError {
    /// 1-based data row number (the header is not counted).
    pub row: u64,
    pub errors: Vec<String>,
}

/// Response from `POST /research_data/import`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportReport {
    pub attempted: u64,
    pub imported: u64,
    pub failed: u64,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.imported += 1;
    }

    pub fn record_failure(&mut self, row: u64, errors: Vec<String>) {
        self.attempted += 1;
        self.failed += 1;
        self.errors.push(ImportRowError { row, errors });
    }
}

/// Error body for every non-2xx response.
///
/// NotFound and BadRequest carry `error`, `message` and `status`. Validation
/// failures additionally carry the complete `errors` list and the per-field
/// `details` map.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Vec<String>>,
}

impl ErrorResponse {
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::simple("Record not found", message, 404)
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::simple("Bad request", message, 400)
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::simple(
            "Internal server error",
            "The request could not be completed",
            500,
        )
    }

    #[must_use]
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            error: "Validation failed".to_string(),
            message: "The request could not be completed due to validation errors".to_string(),
            status: 422,
            errors: errors.full_messages(),
            details: errors.details(),
        }
    }

    fn simple(error: &str, message: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status,
            errors: Vec::new(),
            details: BTreeMap::new(),
        }
    }
}
