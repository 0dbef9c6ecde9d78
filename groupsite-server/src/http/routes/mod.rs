//! Route handlers organized by resource

pub mod contacts;
pub mod group_description;
pub mod health;
pub mod reviews;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::repos::Page;

/// JSON array of rows with the `Content-Range` header react-admin reads
pub(crate) fn page_response(page: Page) -> Response {
    (
        [(header::CONTENT_RANGE, page.range.to_string())],
        Json(page.rows),
    )
        .into_response()
}
