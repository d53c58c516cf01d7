//! # rescat-client
//!
//! Typed HTTP client for the rescat research catalog API.
//!
//! Every method maps to one endpoint and decodes the shared response types
//! from `rescat-core`, so client and server agree on the wire shape.

mod error;
mod http;

pub use error::ClientError;

use std::time::Duration;

use rescat_core::entities::ResearchRecord;
use rescat_core::payload::RecordPayload;
use rescat_core::query::RecordFilter;
use rescat_core::responses::{Analytics, CategoriesResponse, ImportReport, ListResponse};
use serde::Serialize;

use crate::http::check_response;

/// Path the record endpoints are mounted under.
pub const RECORDS_PATH: &str = "/api/v1/research_data";

/// Listing request: filters plus optional page selection.
///
/// Unset page values are resolved by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub filter: RecordFilter,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListRequest {
    fn query_string(&self) -> String {
        let mut pairs = filter_pairs(&self.filter);
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        encode_pairs(&pairs)
    }
}

fn filter_pairs(filter: &RecordFilter) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(search) = filter.search_term() {
        pairs.push(("search", search.to_string()));
    }
    if let Some(category) = filter.category_value() {
        pairs.push(("category", category.to_string()));
    }
    if let Some(from) = filter.date_from {
        pairs.push(("date_from", from.to_string()));
    }
    if let Some(to) = filter.date_to {
        pairs.push(("date_to", to.to_string()));
    }
    pairs
}

fn encode_pairs(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{joined}")
}

#[derive(Serialize)]
struct Envelope<'a> {
    research_datum: &'a RecordPayload,
}

/// HTTP client for one rescat server.
#[derive(Debug, Clone)]
pub struct ResearchClient {
    base: String,
    http: reqwest::Client,
}

impl ResearchClient {
    /// Client for the server at `base_url` (e.g. `http://127.0.0.1:3001`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] for a non-`http(s)` URL, or
    /// [`ClientError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("rescat-client/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Self::with_client(base_url, http)
    }

    /// Client using a caller-configured `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] for a non-`http(s)` URL.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let base = base_url.trim().trim_end_matches('/');
        let has_host = base
            .strip_prefix("http://")
            .or_else(|| base.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base: base.to_string(),
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn records_url(&self, suffix: &str) -> String {
        format!("{}{RECORDS_PATH}{suffix}", self.base)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        tracing::debug!(%url, "GET");
        let resp = check_response(self.http.get(url).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `GET /healthz`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the server is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = format!("{}/healthz", self.base);
        check_response(self.http.get(&url).send().await?).await?;
        Ok(())
    }

    /// One page of records matching the request's filters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn list(&self, request: &ListRequest) -> Result<ListResponse, ClientError> {
        self.get_json(&self.records_url(&request.query_string()))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 404 for an unknown id.
    pub async fn get(&self, id: i64) -> Result<ResearchRecord, ClientError> {
        self.get_json(&self.records_url(&format!("/{id}"))).await
    }

    /// Create a record. The payload is sent wrapped under `research_datum`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 422 and every violation when
    /// the payload is invalid.
    pub async fn create(&self, payload: &RecordPayload) -> Result<ResearchRecord, ClientError> {
        let url = self.records_url("");
        tracing::debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .json(&Envelope {
                research_datum: payload,
            })
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// Partially update a record. Keys absent from `payload` are unchanged;
    /// explicit nulls clear optional fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 404 or 422.
    pub async fn update(
        &self,
        id: i64,
        payload: &RecordPayload,
    ) -> Result<ResearchRecord, ClientError> {
        let url = self.records_url(&format!("/{id}"));
        tracing::debug!(%url, "PATCH");
        let resp = self
            .http
            .patch(&url)
            .json(&Envelope {
                research_datum: payload,
            })
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 404 for an unknown id.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let url = self.records_url(&format!("/{id}"));
        tracing::debug!(%url, "DELETE");
        check_response(self.http.delete(&url).send().await?).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn analytics(&self) -> Result<Analytics, ClientError> {
        self.get_json(&self.records_url("/analytics")).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn categories(&self) -> Result<CategoriesResponse, ClientError> {
        self.get_json(&self.records_url("/categories")).await
    }

    /// CSV document of every record matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn export_csv(&self, filter: &RecordFilter) -> Result<String, ClientError> {
        let query = encode_pairs(&filter_pairs(filter));
        let url = self.records_url(&format!("/export{query}"));
        tracing::debug!(%url, "GET");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(resp.text().await?)
    }

    /// Upload a CSV document for import.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 400 when the document has no
    /// recognisable header.
    pub async fn import_csv(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ImportReport, ClientError> {
        let url = self.records_url("/import");
        tracing::debug!(%url, bytes = contents.len(), "POST multipart");
        let part = reqwest::multipart::Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp = self.http.post(&url).multipart(form).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }
}
