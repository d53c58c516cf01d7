//! Shared test utilities for rescat-db unit tests.

use rescat_config::PaginationConfig;
use rescat_core::entities::{NewRecord, ResearchRecord};
use rescat_core::fields::Field;
use rescat_core::payload::RecordPayload;

use crate::service::RecordService;

/// In-memory service with default pagination.
pub async fn test_service() -> RecordService {
    RecordService::new_local(":memory:", PaginationConfig::default())
        .await
        .unwrap()
}

/// A valid payload with the four required fields.
pub fn payload(title: &str, category: &str, date: &str) -> RecordPayload {
    RecordPayload::default()
        .with(Field::Title, title)
        .with(Field::Author, "Dr. Sarah Johnson")
        .with(Field::Category, category)
        .with(Field::PublicationDate, date)
}

/// Insert a record built from [`payload`].
pub async fn insert(
    svc: &RecordService,
    title: &str,
    category: &str,
    date: &str,
) -> ResearchRecord {
    let new = NewRecord::from_payload(payload(title, category, date)).unwrap();
    svc.create_record(new).await.unwrap()
}
