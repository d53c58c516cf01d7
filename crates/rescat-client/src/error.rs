//! Client error types.

use rescat_core::responses::ErrorResponse;
use thiserror::Error;

/// Errors returned by [`crate::ResearchClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL is not an absolute `http(s)` URL.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport or body decoding error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {}", .body.message)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Decoded error body. Non-JSON bodies are carried in `message`.
        body: ErrorResponse,
    },
}

impl ClientError {
    /// HTTP status of an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Full validation messages when the server rejected a payload.
    #[must_use]
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            Self::Api { status: 422, body } => Some(&body.errors),
            _ => None,
        }
    }
}
