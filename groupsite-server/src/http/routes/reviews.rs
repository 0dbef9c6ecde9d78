//! Review endpoints - read only
//!
//! `GET /reviews` pages like contacts when `_start` or `_end` is present and
//! returns the whole table (no Content-Range) otherwise.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::page_response;
use crate::db::{ReviewListing, ReviewRepo, Table};
use crate::http::error::ApiError;
use crate::http::extractors::RowId;
use crate::http::server::AppState;
use crate::models::{ListParams, Row};

/// GET /reviews
async fn list_reviews(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let request = params.into_request(Table::Reviews.sortable())?;
    let listing = ReviewRepo::new(state.gateway()).list(&request).await?;

    Ok(match listing {
        ReviewListing::Page(page) => page_response(page),
        ReviewListing::All(rows) => Json(rows).into_response(),
    })
}

/// GET /reviews/{id}
async fn get_review(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
) -> Result<Json<Row>, ApiError> {
    let row = ReviewRepo::new(state.gateway()).get(id).await?;
    Ok(Json(row))
}

/// Review routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews", get(list_reviews))
        .route("/reviews/{id}", get(get_review))
}
