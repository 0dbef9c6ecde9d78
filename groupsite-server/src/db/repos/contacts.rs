//! Contact repository
//!
//! The only writable table. Update echoes the validated input instead of
//! re-reading the row.

use super::{fetch_by_id, fetch_page, Page};
use crate::db::gateway::{DbError, QueryGateway, Table};
use crate::models::{Contact, ContactFields, PageRequest, Row};

const TABLE: Table = Table::Contacts;

/// Contact repository
pub struct ContactRepo<'a> {
    gateway: &'a dyn QueryGateway,
}

impl<'a> ContactRepo<'a> {
    pub fn new(gateway: &'a dyn QueryGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page, DbError> {
        fetch_page(self.gateway, TABLE, page).await
    }

    pub async fn get(&self, id: i64) -> Result<Row, DbError> {
        fetch_by_id(self.gateway, TABLE, id).await
    }

    /// Insert and return the contact with its generated id.
    pub async fn create(&self, fields: ContactFields) -> Result<Contact, DbError> {
        let id = self
            .gateway
            .insert(
                TABLE,
                &[("info_type", fields.info_type()), ("value", fields.value())],
            )
            .await?;

        tracing::debug!(id, "contact created");
        Ok(fields.into_contact(id))
    }

    pub async fn update(&self, id: i64, fields: ContactFields) -> Result<Contact, DbError> {
        let affected = self
            .gateway
            .update_by_id(
                TABLE,
                id,
                &[("info_type", fields.info_type()), ("value", fields.value())],
            )
            .await?;

        if affected == 0 {
            return Err(DbError::not_found(TABLE, id));
        }
        Ok(fields.into_contact(id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let affected = self.gateway.delete_by_id(TABLE, id).await?;
        if affected == 0 {
            return Err(DbError::not_found(TABLE, id));
        }
        tracing::debug!(id, "contact deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryGateway;

    fn fields(info_type: &str, value: &str) -> ContactFields {
        ContactFields::new(Some(info_type.into()), Some(value.into())).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let gw = MemoryGateway::new();
        let repo = ContactRepo::new(&gw);

        let created = repo.create(fields("email", "a@b.com")).await.unwrap();
        let row = repo.get(created.id).await.unwrap();

        assert_eq!(row["info_type"], "email");
        assert_eq!(row["value"], "a@b.com");
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found_and_writes_nothing() {
        let gw = MemoryGateway::new();
        let repo = ContactRepo::new(&gw);

        let err = repo.update(5, fields("phone", "123")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "contacts", .. }));
        assert!(gw.rows(Table::Contacts).is_empty());
    }

    #[tokio::test]
    async fn delete_twice() {
        let gw = MemoryGateway::new();
        let repo = ContactRepo::new(&gw);
        let created = repo.create(fields("tg", "@group")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_reports_total() {
        let gw = MemoryGateway::new();
        let repo = ContactRepo::new(&gw);
        for i in 0..3 {
            repo.create(fields("phone", &i.to_string())).await.unwrap();
        }

        let page = crate::models::ListParams::default()
            .into_page(TABLE.sortable())
            .unwrap();
        let page = repo.list(&page).await.unwrap();
        assert_eq!(page.rows.len(), 3);
        assert_eq!(page.range.to_string(), "contacts 0-5/3");
    }
}
