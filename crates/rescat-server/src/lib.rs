//! # rescat-server
//!
//! HTTP JSON API over the research catalog.
//!
//! Record routes are mounted twice, at `/research_data` and at
//! `/api/v1/research_data`. Handlers receive the shared `RecordService` as
//! axum state and translate every failure into the JSON error shape.

pub mod app;
pub mod error;
pub mod handlers;
pub mod params;

pub use app::{AppState, router, serve};
pub use error::ApiError;
