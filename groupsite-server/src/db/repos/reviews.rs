//! Review repository
//!
//! Listing has two shapes: the admin UI pages through reviews, the public
//! site takes the whole table at once.

use super::{fetch_by_id, fetch_page, Page};
use crate::db::gateway::{DbError, QueryGateway, Table};
use crate::models::{ListRequest, Row};

const TABLE: Table = Table::Reviews;

/// Result of a review listing
#[derive(Debug, Clone)]
pub enum ReviewListing {
    Page(Page),
    All(Vec<Row>),
}

/// Read-only access to the reviews table
pub struct ReviewRepo<'a> {
    gateway: &'a dyn QueryGateway,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(gateway: &'a dyn QueryGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, request: &ListRequest) -> Result<ReviewListing, DbError> {
        match request {
            ListRequest::Paginated(page) => {
                fetch_page(self.gateway, TABLE, page).await.map(ReviewListing::Page)
            }
            ListRequest::Full => self.gateway.select_all(TABLE).await.map(ReviewListing::All),
        }
    }

    pub async fn get(&self, id: i64) -> Result<Row, DbError> {
        fetch_by_id(self.gateway, TABLE, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryGateway;
    use crate::models::ListParams;

    fn seeded(n: usize) -> MemoryGateway {
        let gw = MemoryGateway::new();
        for i in 0..n {
            let mut row = Row::new();
            row.insert("author".into(), format!("guest {}", i).into());
            gw.seed(TABLE, row);
        }
        gw
    }

    #[tokio::test]
    async fn full_listing_returns_every_row() {
        let gw = seeded(8);
        match ReviewRepo::new(&gw).list(&ListRequest::Full).await.unwrap() {
            ReviewListing::All(rows) => assert_eq!(rows.len(), 8),
            ReviewListing::Page(_) => panic!("expected full listing"),
        }
    }

    #[tokio::test]
    async fn paginated_listing_is_windowed() {
        let gw = seeded(8);
        let params = ListParams {
            start: Some("6".into()),
            end: Some("10".into()),
            ..Default::default()
        };
        let request = params.into_request(TABLE.sortable()).unwrap();
        let ReviewListing::Page(page) = ReviewRepo::new(&gw).list(&request).await.unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.range.to_string(), "reviews 6-10/8");
    }
}
