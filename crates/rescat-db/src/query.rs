//! SQL translation of `RecordFilter`.
//!
//! Builds a `WHERE` clause with numbered placeholders plus the matching
//! parameter list. The search term binds once and is referenced by all four
//! searchable columns.

use rescat_core::query::RecordFilter;
use rescat_core::validation::DATE_FORMAT;

/// Columns matched by free-text search.
pub const SEARCH_COLUMNS: [&str; 4] = ["title", "author", "keywords", "abstract"];

/// Listing order. `id` breaks ties between rows created in the same microsecond.
pub const ORDER_BY: &str = "ORDER BY created_at DESC, id DESC";

/// A `WHERE` clause (empty when nothing filters) and its parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<libsql::Value>,
}

impl WhereClause {
    /// Placeholder index for the next parameter appended after this clause.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.params.len() + 1
    }
}

/// Translate a filter into SQL. Blank search and category values are ignored.
#[must_use]
pub fn where_clause(filter: &RecordFilter) -> WhereClause {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(term) = filter.search_term() {
        params.push(libsql::Value::Text(format!("%{}%", escape_like(term))));
        let idx = params.len();
        let ors: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|col| format!("{col} LIKE ?{idx} ESCAPE '\\'"))
            .collect();
        conditions.push(format!("({})", ors.join(" OR ")));
    }
    if let Some(category) = filter.category_value() {
        params.push(libsql::Value::Text(category.to_string()));
        conditions.push(format!("category = ?{}", params.len()));
    }
    if let Some(from) = filter.date_from {
        params.push(libsql::Value::Text(from.format(DATE_FORMAT).to_string()));
        conditions.push(format!("publication_date >= ?{}", params.len()));
    }
    if let Some(to) = filter.date_to {
        params.push(libsql::Value::Text(to.format(DATE_FORMAT).to_string()));
        conditions.push(format!("publication_date <= ?{}", params.len()));
    }

    let sql = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    WhereClause { sql, params }
}

/// Escape `LIKE` wildcards so the term matches literally under `ESCAPE '\'`.
#[must_use]
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
