//! Contact endpoints - full CRUD for the admin UI

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::page_response;
use crate::db::{ContactRepo, Table};
use crate::http::error::ApiError;
use crate::http::extractors::RowId;
use crate::http::server::AppState;
use crate::models::{Contact, ContactFields, ContactPayload, ListParams, Row};

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /contacts - one page of contacts with a Content-Range header
async fn list_contacts(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let page = params.into_page(Table::Contacts.sortable())?;
    let page = ContactRepo::new(state.gateway()).list(&page).await?;
    Ok(page_response(page))
}

/// GET /contacts/{id}
async fn get_contact(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
) -> Result<Json<Row>, ApiError> {
    let row = ContactRepo::new(state.gateway()).get(id).await?;
    Ok(Json(row))
}

/// POST /contacts
async fn create_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(payload) = payload?;
    let fields = ContactFields::try_from(payload)?;

    let contact = ContactRepo::new(state.gateway()).create(fields).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /contacts/{id} - overwrite both fields, echoing the input back
async fn update_contact(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Json(payload) = payload?;
    let fields = ContactFields::try_from(payload)?;

    let contact = ContactRepo::new(state.gateway()).update(id, fields).await?;
    Ok(Json(contact))
}

/// DELETE /contacts/{id}
async fn delete_contact(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
) -> Result<Json<DeleteResponse>, ApiError> {
    ContactRepo::new(state.gateway()).delete(id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

/// Contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}
