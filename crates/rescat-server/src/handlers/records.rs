//! CRUD and listing handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use rescat_core::entities::ResearchRecord;
use rescat_core::payload::PayloadEnvelope;
use rescat_core::responses::ListResponse;

use crate::app::AppState;
use crate::error::ApiError;
use crate::params::ListParams;

/// Path ids that are not integers cannot name a record.
fn record_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::record_not_found(raw))
}

/// `GET /research_data`
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(params) = params?;
    let query = params.query(&state)?;
    let page = state.list_records(&query).await?;
    Ok(Json(page.into()))
}

/// `GET /research_data/:id`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResearchRecord>, ApiError> {
    let record = state.get_record(record_id(&id)?).await?;
    Ok(Json(record))
}

/// `POST /research_data`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<PayloadEnvelope>, JsonRejection>,
) -> Result<(StatusCode, Json<ResearchRecord>), ApiError> {
    let Json(envelope) = body?;
    let record = state.create_from_payload(envelope.into_payload()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT` / `PATCH /research_data/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<PayloadEnvelope>, JsonRejection>,
) -> Result<Json<ResearchRecord>, ApiError> {
    let id = record_id(&id)?;
    let Json(envelope) = body?;
    let record = state.update_from_payload(id, envelope.into_payload()).await?;
    Ok(Json(record))
}

/// `DELETE /research_data/:id`
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.delete_record(record_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
