//! Request-boundary error translation.
//!
//! Every handler returns `Result<_, ApiError>`; `IntoResponse` renders the
//! variant as the JSON error body with the matching status code.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rescat_core::errors::ValidationErrors;
use rescat_core::responses::ErrorResponse;
use rescat_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown record id.
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed request parameter or body.
    #[error("{0}")]
    BadRequest(String),

    /// One or more field rules violated.
    #[error(transparent)]
    Validation(ValidationErrors),

    /// Anything else. The cause is logged, never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// `NotFound` for an id that does not name a record.
    #[must_use]
    pub fn record_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Couldn't find ResearchDatum with 'id'={id}"))
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    #[must_use]
    pub fn body(&self) -> ErrorResponse {
        match self {
            Self::NotFound(message) => ErrorResponse::not_found(message.clone()),
            Self::BadRequest(message) => ErrorResponse::bad_request(message.clone()),
            Self::Validation(errors) => ErrorResponse::validation(errors),
            Self::Internal(_) => ErrorResponse::internal(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { id } => Self::record_not_found(id),
            DatabaseError::Validation(errors) => Self::Validation(errors),
            DatabaseError::Transfer(transfer) => Self::BadRequest(transfer.to_string()),
            other => {
                tracing::error!(error = %other, "database operation failed");
                Self::Internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self::BadRequest(format!("Multipart error: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rescat_core::errors::BLANK;
    use rescat_core::fields::Field;

    #[test]
    fn database_errors_map_to_statuses() {
        let not_found: ApiError = DatabaseError::NotFound { id: 9 }.into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            not_found.body().message,
            "Couldn't find ResearchDatum with 'id'=9"
        );

        let mut errors = ValidationErrors::new();
        errors.add(Field::Title, BLANK);
        let invalid: ApiError = DatabaseError::Validation(errors).into();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.body().errors, vec!["Title can't be blank"]);

        let internal: ApiError = DatabaseError::Query("disk I/O error".into()).into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!internal.body().message.contains("disk"));
    }
}
