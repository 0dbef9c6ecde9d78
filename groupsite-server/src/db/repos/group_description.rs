use super::fetch_by_id;
use crate::db::gateway::{DbError, QueryGateway, Table};
use crate::models::Row;

const TABLE: Table = Table::GroupDescription;

/// Read-only access to the group description table
pub struct GroupDescriptionRepo<'a> {
    gateway: &'a dyn QueryGateway,
}

impl<'a> GroupDescriptionRepo<'a> {
    pub fn new(gateway: &'a dyn QueryGateway) -> Self {
        Self { gateway }
    }

    /// The current description, if one has been seeded.
    pub async fn current(&self) -> Result<Option<Row>, DbError> {
        self.gateway.select_first(TABLE).await
    }

    pub async fn get(&self, id: i64) -> Result<Row, DbError> {
        fetch_by_id(self.gateway, TABLE, id).await
    }
}
