//! Row-to-entity parsing helpers.
//!
//! `libsql::Row` is column-indexed; these helpers convert TEXT columns into
//! typed values. Timestamps written by this crate always use
//! [`format_timestamp`], but values written by other tools in `SQLite`'s
//! `datetime('now')` form are accepted too.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rescat_core::validation;

use crate::error::DatabaseError;

/// Fixed-width RFC 3339 UTC with microseconds, e.g. `2026-02-09T14:30:00.000000Z`.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is neither RFC 3339 nor
/// `SQLite`'s `%Y-%m-%d %H:%M:%S`.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a `YYYY-MM-DD` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` on any other format.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    validation::parse_date(s).map_err(|e| DatabaseError::Query(format!("Failed to parse date: {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a `COUNT(*)` column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let n = row.get::<i64>(idx)?;
    u64::try_from(n).map_err(|_| DatabaseError::Query(format!("negative count {n}")))
}

/// Bind an optional string as TEXT or NULL.
#[must_use]
pub fn text_or_null(value: Option<String>) -> libsql::Value {
    value.map_or(libsql::Value::Null, libsql::Value::Text)
}
