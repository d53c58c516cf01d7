//! Spawns the real router on an ephemeral port backed by an in-memory database.

#![allow(dead_code)]

use std::sync::Arc;

use rescat_config::{PaginationConfig, ServerConfig};
use rescat_db::service::RecordService;
use serde_json::{Value, json};

pub struct TestApp {
    pub base: String,
    pub http: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(PaginationConfig::default()).await
    }

    pub async fn spawn_with(pagination: PaginationConfig) -> Self {
        let service = RecordService::new_local(":memory:", pagination)
            .await
            .unwrap();
        let app = rescat_server::router(Arc::new(service), &ServerConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(rescat_server::serve(listener, app, std::future::pending()));
        Self {
            base: format!("http://{addr}"),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// POST a valid record and return its JSON.
    pub async fn create(&self, title: &str, category: &str, date: &str) -> Value {
        let resp = self
            .http
            .post(self.url("/research_data"))
            .json(&json!({
                "research_datum": {
                    "title": title,
                    "author": "Dr. Sarah Johnson",
                    "category": category,
                    "publication_date": date,
                }
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        resp.json().await.unwrap()
    }
}
