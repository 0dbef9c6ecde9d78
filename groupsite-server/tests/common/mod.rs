//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use groupsite_server::db::{MemoryGateway, Table};
use groupsite_server::models::Row;
use groupsite_server::{build_router, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn content_range(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_RANGE)
            .map(|v| v.to_str().expect("non-ascii header"))
    }

    pub fn array(&self) -> &Vec<Value> {
        self.body.as_array().expect("expected a JSON array")
    }
}

pub fn router(gateway: Arc<MemoryGateway>) -> Router {
    build_router(gateway, &ServerConfig::default())
}

pub fn object(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

/// Gateway holding `n` contacts with values `c0..c{n-1}`
pub fn contacts(n: usize) -> Arc<MemoryGateway> {
    let gateway = Arc::new(MemoryGateway::new());
    for i in 0..n {
        gateway.seed(
            Table::Contacts,
            object(serde_json::json!({ "info_type": "phone", "value": format!("c{}", i) })),
        );
    }
    gateway
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}
