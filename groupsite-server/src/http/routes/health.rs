//! Liveness check. Never touches the database.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::db::Table;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Resource names the admin UI can point a data provider at
    pub resources: Vec<&'static str>,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        resources: Table::ALL.iter().map(Table::resource).collect(),
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
