//! Listing filters and pagination math.
//!
//! The SQL translation lives in `rescat-db`; this module only holds the
//! typed request contract and the arithmetic, so both the server and the
//! client agree on it.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Page size used when the caller gives none (or a non-positive one).
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound on the page size.
pub const MAX_PER_PAGE: u32 = 100;

/// Filter predicates shared by listing and export.
///
/// Blank strings are treated as absent. Category is trimmed, the search term
/// is matched as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Case-insensitive substring over title, author, keywords and abstract.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower bound on `publication_date`.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `publication_date`.
    pub date_to: Option<NaiveDate>,
}

impl RecordFilter {
    /// Non-blank search term. Surrounding spaces are kept so that `" net "`
    /// matches a whole word only.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Trimmed, non-blank category.
    #[must_use]
    pub fn category_value(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A resolved page request. `page >= 1` and `1 <= per_page <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Clamp raw request values into a valid page request.
    ///
    /// - `page` absent or `< 1` becomes 1.
    /// - `per_page` absent or `<= 0` becomes `default_per_page`.
    /// - `per_page` above `max_per_page` becomes `max_per_page`.
    #[must_use]
    pub fn resolve(
        page: Option<i64>,
        per_page: Option<i64>,
        default_per_page: u32,
        max_per_page: u32,
    ) -> Self {
        let max_per_page = max_per_page.max(1);
        let page = page
            .filter(|p| *p >= 1)
            .map_or(1, |p| u32::try_from(p).unwrap_or(u32::MAX));
        let per_page = per_page
            .filter(|n| *n >= 1)
            .map_or(default_per_page, |n| u32::try_from(n).unwrap_or(u32::MAX))
            .clamp(1, max_per_page);
        Self { page, per_page }
    }

    /// Rows skipped before this page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64).saturating_sub(1) * self.per_page as u64
    }

    /// `ceil(total / per_page)`; zero when there are no matches.
    #[must_use]
    pub const fn total_pages(self, total_count: u64) -> u64 {
        total_count.div_ceil(self.per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// A complete listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub filter: RecordFilter,
    pub pagination: Pagination,
}

/// One page of results plus totals computed before pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(data: Vec<T>, total_count: u64, pagination: Pagination) -> Self {
        Self {
            data,
            total_count,
            total_pages: pagination.total_pages(total_count),
            current_page: pagination.page,
            per_page: pagination.per_page,
        }
    }
}
