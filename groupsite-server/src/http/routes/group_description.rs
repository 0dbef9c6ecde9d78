//! Group description endpoints - read only

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::GroupDescriptionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::RowId;
use crate::http::server::AppState;
use crate::models::{GroupDescription, Row};

/// Stored row, or the placeholder when nothing has been seeded
#[derive(Serialize)]
#[serde(untagged)]
pub enum DescriptionResponse {
    Stored(Row),
    Placeholder(GroupDescription),
}

/// GET /group-description
async fn current_description(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DescriptionResponse>, ApiError> {
    let body = match GroupDescriptionRepo::new(state.gateway()).current().await? {
        Some(row) => DescriptionResponse::Stored(row),
        None => DescriptionResponse::Placeholder(GroupDescription::placeholder()),
    };
    Ok(Json(body))
}

/// GET /group-description/{id}
async fn get_description(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
) -> Result<Json<Row>, ApiError> {
    let row = GroupDescriptionRepo::new(state.gateway()).get(id).await?;
    Ok(Json(row))
}

/// Group description routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/group-description", get(current_description))
        .route("/group-description/{id}", get(get_description))
}
