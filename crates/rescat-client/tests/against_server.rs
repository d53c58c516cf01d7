//! Drives a real server through the typed client.

use std::sync::Arc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rescat_client::{ListRequest, ResearchClient};
use rescat_config::{PaginationConfig, ServerConfig};
use rescat_core::fields::Field;
use rescat_core::payload::RecordPayload;
use rescat_core::query::RecordFilter;
use rescat_db::service::RecordService;

async fn spawn_server() -> ResearchClient {
    let service = RecordService::new_local(":memory:", PaginationConfig::default())
        .await
        .unwrap();
    let app = rescat_server::router(Arc::new(service), &ServerConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(rescat_server::serve(listener, app, std::future::pending()));
    ResearchClient::new(&format!("http://{addr}")).unwrap()
}

fn payload(title: &str, category: &str, date: &str) -> RecordPayload {
    RecordPayload::default()
        .with(Field::Title, title)
        .with(Field::Author, "Prof. Michael Chen")
        .with(Field::Category, category)
        .with(Field::PublicationDate, date)
}

#[tokio::test]
async fn crud_lifecycle() {
    let client = spawn_server().await;
    client.health().await.unwrap();

    let created = client
        .create(&payload("Climate Change Impact on Biodiversity", "Environmental Science", "2023-08-22"))
        .await
        .unwrap();
    assert_eq!(client.get(created.id).await.unwrap(), created);

    let mut changes = RecordPayload::default().with(Field::Journal, "Nature Climate Change");
    changes.set(Field::Keywords, None);
    let updated = client.update(created.id, &changes).await.unwrap();
    assert_eq!(updated.journal.as_deref(), Some("Nature Climate Change"));
    assert_eq!(updated.title, created.title);

    client.delete(created.id).await.unwrap();
    let err = client.get(created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(client.delete(created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn invalid_payload_reports_every_violation() {
    let client = spawn_server().await;
    let err = client
        .create(&RecordPayload::default().with(Field::Title, "Hi"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(
        err.validation_messages().unwrap(),
        [
            "Title is too short (minimum is 5 characters)",
            "Author can't be blank",
            "Category can't be blank",
            "Publication date can't be blank",
        ]
    );
}

#[tokio::test]
async fn list_filters_and_pages() {
    let client = spawn_server().await;
    for i in 0..4 {
        client
            .create(&payload(&format!("Neural network study {i}"), "Computer Science", "2024-02-10"))
            .await
            .unwrap();
    }
    client
        .create(&payload("Soil microbiome survey", "Biology", "2021-02-10"))
        .await
        .unwrap();

    let page = client
        .list(&ListRequest {
            filter: RecordFilter {
                search: Some("neural".into()),
                ..Default::default()
            },
            page: Some(2),
            per_page: Some(3),
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 4);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.total_count, 4);

    let old = client
        .list(&ListRequest {
            filter: RecordFilter {
                date_to: NaiveDate::from_ymd_opt(2022, 12, 31),
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(old.data.len(), 1);
    assert_eq!(old.data[0].category, "Biology");

    let categories = client.categories().await.unwrap();
    assert_eq!(categories.categories, vec!["Biology", "Computer Science"]);

    let analytics = client.analytics().await.unwrap();
    assert_eq!(analytics.total_count, 5);
    assert_eq!(analytics.by_category["Computer Science"], 4);
    assert_eq!(analytics.by_month["2021-02"], 1);
}

#[tokio::test]
async fn export_import_between_servers() {
    let source = spawn_server().await;
    source
        .create(&payload("Quantum error correction", "Physics", "2022-11-03"))
        .await
        .unwrap();
    source
        .create(&payload("Protein folding dynamics", "Biology", "2023-03-19"))
        .await
        .unwrap();

    let csv = source
        .export_csv(&RecordFilter {
            category: Some("Physics".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(csv.lines().count(), 2);

    let target = spawn_server().await;
    let report = target.import_csv("physics.csv", csv.into_bytes()).await.unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.failed, 0);

    let listed = target.list(&ListRequest::default()).await.unwrap();
    assert_eq!(listed.data[0].title, "Quantum error correction");

    let err = target
        .import_csv("junk.csv", b"nothing,useful\n1,2\n".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}
