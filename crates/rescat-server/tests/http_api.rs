//! End-to-end tests driving the HTTP API over a real socket.

mod common;

use common::TestApp;
use pretty_assertions::assert_eq;
use rescat_config::PaginationConfig;
use serde_json::{Value, json};

#[tokio::test]
async fn healthz_reports_ok() {
    let app = TestApp::spawn().await;
    let body: Value = app
        .http
        .get(app.url("/healthz"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn create_then_show() {
    let app = TestApp::spawn().await;
    let created = app
        .create("Machine Learning in Healthcare", "Computer Science", "2023-06-15")
        .await;

    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["abstract"], Value::Null);
    assert_eq!(created["publication_date"], "2023-06-15");

    let shown: Value = app
        .http
        .get(app.url(&format!("/research_data/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shown, created);
}

#[tokio::test]
async fn flat_body_is_accepted() {
    let app = TestApp::spawn().await;
    let resp = app
        .http
        .post(app.url("/api/v1/research_data"))
        .json(&json!({
            "title": "Flat payload record",
            "author": "Jane Smith",
            "category": "Science",
            "publication_date": "2024-03-15",
            "volume": 12,
            "impact_factor": 3.1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["volume"], "12");
}

#[tokio::test]
async fn short_title_is_rejected_with_every_error() {
    let app = TestApp::spawn().await;
    let resp = app
        .http
        .post(app.url("/research_data"))
        .json(&json!({"research_datum": {"title": "Hi", "author": "Jane Smith"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["status"], 422);
    assert_eq!(
        body["errors"],
        json!([
            "Title is too short (minimum is 5 characters)",
            "Category can't be blank",
            "Publication date can't be blank"
        ])
    );
    assert_eq!(
        body["details"]["title"],
        json!(["is too short (minimum is 5 characters)"])
    );
}

#[tokio::test]
async fn ten_character_title_shows_up_everywhere() {
    let app = TestApp::spawn().await;
    app.create("Ten chars!", "Physics", "2024-01-15").await;

    let list: Value = app
        .http
        .get(app.url("/research_data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["data"][0]["title"], "Ten chars!");

    let analytics: Value = app
        .http
        .get(app.url("/research_data/analytics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(analytics["by_category"]["Physics"], 1);
    assert_eq!(analytics["by_month"]["2024-01"], 1);
    assert_eq!(analytics["recent_additions"], 1);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;
    let resp = app
        .http
        .post(app.url("/research_data"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn list_paginates_with_meta() {
    let app = TestApp::spawn().await;
    for i in 0..12 {
        app.create(&format!("Paginated record {i:02}"), "Science", "2024-01-01")
            .await;
    }

    let body: Value = app
        .http
        .get(app.url("/research_data?page=2&per_page=5"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["total_count"], 12);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["per_page"], 5);
    assert_eq!(body["meta"]["total_count"], 12);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"][0]["title"], "Paginated record 06");

    let clamped: Value = app
        .http
        .get(app.url("/research_data?page=0&per_page=-5&search="))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(clamped["current_page"], 1);
    assert_eq!(clamped["per_page"], 10);
}

#[tokio::test]
async fn per_page_is_capped_by_config() {
    let app = TestApp::spawn_with(PaginationConfig {
        default_per_page: 2,
        max_per_page: 3,
    })
    .await;
    let body: Value = app
        .http
        .get(app.url("/research_data?per_page=50"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["per_page"], 3);
    assert_eq!(body["total_pages"], 0);
}

#[tokio::test]
async fn filters_apply_and_bad_dates_are_rejected() {
    let app = TestApp::spawn().await;
    app.create("Coral reef bleaching", "Biology", "2023-05-01").await;
    app.create("Coral genome atlas", "Biology", "2024-05-01").await;
    app.create("Reef acoustics survey", "Physics", "2023-05-01").await;

    let body: Value = app
        .http
        .get(app.url(
            "/research_data?search=CORAL&category=Biology&date_from=2023-01-01&date_to=2023-12-31",
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["data"][0]["title"], "Coral reef bleaching");

    let resp = app
        .http
        .get(app.url("/research_data?date_from=May%202023"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn update_put_and_patch() {
    let app = TestApp::spawn().await;
    let created = app.create("Record before update", "Science", "2024-01-01").await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .http
        .put(app.url(&format!("/research_data/{id}")))
        .json(&json!({"research_datum": {"title": "Record after update", "journal": "Nature"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["title"], "Record after update");
    assert_eq!(updated["journal"], "Nature");
    assert_eq!(updated["author"], created["author"]);

    let cleared: Value = app
        .http
        .patch(app.url(&format!("/api/v1/research_data/{id}")))
        .json(&json!({"journal": null}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cleared["journal"], Value::Null);

    let resp = app
        .http
        .patch(app.url(&format!("/research_data/{id}")))
        .json(&json!({"title": null}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = TestApp::spawn().await;
    for path in ["/research_data/999", "/research_data/abc"] {
        let resp = app.http.get(app.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 404);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Record not found");
        assert_eq!(body["status"], 404);
    }

    let resp = app
        .http
        .put(app.url("/research_data/999"))
        .json(&json!({"title": "Hi"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_removes_from_listing_and_analytics() {
    let app = TestApp::spawn().await;
    let created = app.create("Record to be deleted", "Biology", "2024-01-01").await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .http
        .delete(app.url(&format!("/research_data/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert!(resp.bytes().await.unwrap().is_empty());

    let again = app
        .http
        .delete(app.url(&format!("/research_data/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 404);

    let analytics: Value = app
        .http
        .get(app.url("/research_data/analytics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(analytics["total_count"], 0);
    assert_eq!(analytics["by_category"], json!({}));
}

#[tokio::test]
async fn categories_lists_used_and_suggested() {
    let app = TestApp::spawn().await;
    app.create("Urban planning study", "Urban Studies", "2024-01-01").await;
    app.create("Marine ecosystems study", "Biology", "2024-01-01").await;

    let body: Value = app
        .http
        .get(app.url("/research_data/categories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["categories"], json!(["Biology", "Urban Studies"]));
    assert_eq!(body["suggested"].as_array().unwrap().len(), 10);
}
