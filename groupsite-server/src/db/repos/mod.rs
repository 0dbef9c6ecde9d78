//! Repository implementations for database access
//!
//! Each repository borrows the injected gateway for the span of one request:
//! - Lists issue the page query and a `COUNT(*)` for the range header
//! - Single-row lookups turn "no row" into `DbError::NotFound`
//! - Writes check affected rows rather than reading first

pub mod contacts;
pub mod group_description;
pub mod reviews;

pub use contacts::ContactRepo;
pub use group_description::GroupDescriptionRepo;
pub use reviews::{ReviewListing, ReviewRepo};

use super::gateway::{DbError, QueryGateway, Table};
use crate::models::{ContentRange, PageRequest, Row};

/// One page of rows plus its `Content-Range`
#[derive(Debug, Clone)]
pub struct Page {
    pub rows: Vec<Row>,
    pub range: ContentRange,
}

pub(crate) async fn fetch_page(
    gateway: &dyn QueryGateway,
    table: Table,
    page: &PageRequest,
) -> Result<Page, DbError> {
    let rows = gateway.select_page(table, page).await?;
    let total = gateway.count(table).await?;

    Ok(Page {
        rows,
        range: ContentRange {
            resource: table.resource(),
            window: page.window,
            total,
        },
    })
}

pub(crate) async fn fetch_by_id(
    gateway: &dyn QueryGateway,
    table: Table,
    id: i64,
) -> Result<Row, DbError> {
    gateway
        .select_by_id(table, id)
        .await?
        .ok_or_else(|| DbError::not_found(table, id))
}
