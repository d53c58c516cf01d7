//! Read-only aggregate endpoints.

use axum::Json;
use axum::extract::State;
use rescat_core::entities::SUGGESTED_CATEGORIES;
use rescat_core::responses::{Analytics, CategoriesResponse};

use crate::app::AppState;
use crate::error::ApiError;

/// `GET /research_data/analytics`
pub async fn analytics(State(state): State<AppState>) -> Result<Json<Analytics>, ApiError> {
    Ok(Json(state.analytics().await?))
}

/// `GET /research_data/categories`
pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.categories().await?;
    Ok(Json(CategoriesResponse {
        categories,
        suggested: SUGGESTED_CATEGORIES.iter().map(|c| (*c).to_string()).collect(),
    }))
}
