//! Common test utilities for integration tests
//!
//! Builds the full router over an in-memory store so every test gets a
//! fresh, isolated database without PostgreSQL.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use contactbook_api::app::{build_router, AppState};
use contactbook_api::config::Config;
use contactbook_shared::store::memory::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub config: Config,
}

/// Status plus parsed JSON body (`Value::Null` when empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://unused/contacts".to_string()),
            "JWT_SECRET" => Some(JWT_SECRET.to_string()),
            _ => None,
        })
        .expect("test config");

        let store = Arc::new(MemoryStore::new());
        let app = build_router(AppState::new(store.clone(), config.clone()));

        Self { app, store, config }
    }

    /// Sends a request; `body` is sent as JSON when present
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    /// Registers a user and returns `(user id, access token)`
    pub async fn register(&self, email: &str, password: &str, name: &str) -> (i64, String) {
        let response = self
            .send(
                Method::POST,
                "/auth/register",
                None,
                Some(json!({ "email": email, "password": password, "name": name })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        let data = &response.body["data"];
        (
            data["id"].as_i64().unwrap(),
            data["accessToken"].as_str().unwrap().to_string(),
        )
    }

    /// Creates a contact and returns its JSON representation
    pub async fn create_contact(&self, token: &str, body: Value) -> Value {
        let response = self
            .send(Method::POST, "/contacts", Some(token), Some(body))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"].clone()
    }
}
