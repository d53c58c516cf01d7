//! Typed query-string contracts.
//!
//! Every parameter arrives as text so that blank values (`?category=`) can be
//! treated as absent instead of failing extraction.

use chrono::NaiveDate;
use rescat_core::query::{RecordFilter, RecordQuery};
use rescat_core::validation::parse_date;
use rescat_db::service::RecordService;
use serde::Deserialize;

use crate::error::ApiError;

/// Filters shared by listing and export, plus listing pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ListParams {
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` for a date bound that is not `YYYY-MM-DD`.
    pub fn filter(&self) -> Result<RecordFilter, ApiError> {
        Ok(RecordFilter {
            search: self.search.clone().filter(|v| !v.trim().is_empty()),
            category: non_blank(self.category.as_deref()).map(String::from),
            date_from: date_param("date_from", self.date_from.as_deref())?,
            date_to: date_param("date_to", self.date_to.as_deref())?,
        })
    }

    /// Filter plus pagination resolved against the service's limits.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` for malformed dates or page numbers.
    pub fn query(&self, service: &RecordService) -> Result<RecordQuery, ApiError> {
        let page = int_param("page", self.page.as_deref())?;
        let per_page = int_param("per_page", self.per_page.as_deref())?;
        Ok(RecordQuery {
            filter: self.filter()?,
            pagination: service.resolve_page(page, per_page),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn date_param(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    non_blank(value)
        .map(|text| {
            parse_date(text).map_err(|_| {
                ApiError::BadRequest(format!("{name} must be a date in YYYY-MM-DD format"))
            })
        })
        .transpose()
}

fn int_param(name: &str, value: Option<&str>) -> Result<Option<i64>, ApiError> {
    non_blank(value)
        .map(|text| {
            text.parse::<i64>()
                .map_err(|_| ApiError::BadRequest(format!("{name} must be an integer")))
        })
        .transpose()
}
