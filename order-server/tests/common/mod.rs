//! Shared helpers for the HTTP integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use order_server::api::build_app;
use order_server::services::RecordingNotifier;
use order_server::{Config, ServerState};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    _dir: tempfile::TempDir,
    pub app: Router,
    pub state: ServerState,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    /// In-memory store, recording notifier, default tax 8%
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::with_overrides(dir.path().to_string_lossy().into_owned(), 0);
        config.default_tax_rate = 0.08;
        config.app_name = "OrderBuddy API".into();

        let notifier = Arc::new(RecordingNotifier::new());
        let state = ServerState::in_memory(config, notifier.clone())
            .await
            .expect("memory state");
        let app = build_app(&state);
        Self {
            _dir: dir,
            app,
            state,
            notifier,
        }
    }

    /// Insert a raw document, the record key equals `_id`
    pub async fn seed(&self, table: &'static str, doc: Value) {
        let id = doc["_id"].as_str().expect("_id").to_string();
        self.state
            .db
            .query("CREATE type::thing($tb, $id) CONTENT $data RETURN NONE")
            .bind(("tb", table))
            .bind(("id", id))
            .bind(("data", doc))
            .await
            .expect("seed query")
            .check()
            .expect("seed");
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> (StatusCode, http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, headers, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = self.request(Method::GET, uri, None, None).await;
        (status, body)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self.request(Method::POST, uri, Some(body), None).await;
        (status, body)
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self.request(Method::PATCH, uri, Some(body), None).await;
        (status, body)
    }
}

/// One burger, $4.99, no modifiers
pub fn burger_cart() -> Value {
    serde_json::json!({
        "restaurantId": "r1",
        "locationId": "l1",
        "locationSlug": "downtown",
        "origin": {"id": "table-1", "name": "Table 1"},
        "customer": {"name": "Ana", "phone": "+15550001"},
        "items": [{
            "id": "line-1",
            "menuItemId": "burger",
            "name": "Burger",
            "price": 499,
            "quantity": 1
        }]
    })
}
