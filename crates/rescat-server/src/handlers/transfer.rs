//! CSV export and import endpoints.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;
use rescat_core::responses::ImportReport;
use rescat_core::transfer::export_filename;

use crate::app::AppState;
use crate::error::ApiError;
use crate::params::ListParams;

/// Multipart part carrying the uploaded CSV.
pub const FILE_PART: &str = "file";

/// `GET /research_data/export`
///
/// Accepts the listing filters; pagination parameters are ignored.
pub async fn export(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let filter = params.filter()?;

    let mut body = Vec::new();
    let count = state.export_csv(&filter, &mut body).await?;
    let filename = export_filename(&filter, Utc::now().date_naive());
    tracing::debug!(count, %filename, "CSV export");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// `POST /research_data/import`
pub async fn import(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportReport>, ApiError> {
    let mut multipart = multipart?;

    let mut data = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_PART) {
            data = Some(field.bytes().await?);
        }
    }
    let data = data.ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;

    let report = state.import_csv(data.as_ref()).await?;
    Ok(Json(report))
}
