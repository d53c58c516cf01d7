//! Shared response handling.
//!
//! Non-success responses become [`ClientError::Api`]. The server always sends
//! a JSON error body; anything else (a proxy page, an empty body) is wrapped
//! so callers see one error shape.

use std::collections::BTreeMap;

use rescat_core::responses::ErrorResponse;

use crate::error::ClientError;

/// Return the response unchanged on success, otherwise decode its error body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        body: decode_error_body(status, &text),
    })
}

fn decode_error_body(status: reqwest::StatusCode, text: &str) -> ErrorResponse {
    serde_json::from_str(text).unwrap_or_else(|_| ErrorResponse {
        error: status.canonical_reason().unwrap_or("Unknown status").to_string(),
        message: text.to_string(),
        status: status.as_u16(),
        errors: Vec::new(),
        details: BTreeMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn json_error_body_is_decoded() {
        let resp = mock_response(
            422,
            r#"{"error":"Validation failed","message":"m","status":422,"errors":["Title can't be blank"],"details":{"title":["can't be blank"]}}"#,
        );
        let err = check_response(resp).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.validation_messages(),
            Some(&["Title can't be blank".to_string()][..])
        );
    }

    #[tokio::test]
    async fn plain_text_error_is_wrapped() {
        let resp = mock_response(502, "upstream unavailable");
        let err = check_response(resp).await.unwrap_err();
        let ClientError::Api { status, body } = err else {
            panic!("expected an API error");
        };
        assert_eq!(status, 502);
        assert_eq!(body.error, "Bad Gateway");
        assert_eq!(body.message, "upstream unavailable");
    }

    #[tokio::test]
    async fn not_found_is_recognised() {
        let resp = mock_response(
            404,
            r#"{"error":"Record not found","message":"Couldn't find ResearchDatum with 'id'=9","status":404}"#,
        );
        let err = check_response(resp).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.validation_messages().is_none());
    }
}
