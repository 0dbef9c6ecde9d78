//! PostgreSQL gateway on top of sqlx
//!
//! Rows are returned as `to_jsonb(t)` so tables keep `SELECT *` semantics
//! without this crate knowing every column.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::gateway::{Assignments, DbError, QueryGateway, Table};
use crate::models::{PageRequest, Row};

/// Pool size used when the caller doesn't pick one.
/// Every request issues at most two short queries, so a handful is plenty.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// sqlx-backed [`QueryGateway`]
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url` and wrap it.
    ///
    /// The pool is the only state shared between requests; sqlx owns its
    /// concurrency and connection lifecycle.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        tracing::debug!(max_connections, "connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn select_rows(table: Table) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT to_jsonb(t) AS row FROM ");
    qb.push(table.name()).push(" t");
    qb
}

fn unwrap_rows(rows: Vec<(Json<Row>,)>) -> Vec<Row> {
    rows.into_iter().map(|(Json(row),)| row).collect()
}

#[async_trait]
impl QueryGateway for PgGateway {
    async fn count(&self, table: Table) -> Result<i64, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
        qb.push(table.name());
        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn select_page(&self, table: Table, page: &PageRequest) -> Result<Vec<Row>, DbError> {
        let mut qb = select_rows(table);
        qb.push(" ORDER BY t.")
            .push(page.sort)
            .push(" ")
            .push(page.order.as_sql());
        if page.sort != "id" {
            qb.push(", t.id ASC");
        }
        qb.push(" LIMIT ")
            .push_bind(page.window.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.window.offset() as i64);

        let rows = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(unwrap_rows(rows))
    }

    async fn select_all(&self, table: Table) -> Result<Vec<Row>, DbError> {
        let mut qb = select_rows(table);
        qb.push(" ORDER BY t.id");
        let rows = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(unwrap_rows(rows))
    }

    async fn select_by_id(&self, table: Table, id: i64) -> Result<Option<Row>, DbError> {
        let mut qb = select_rows(table);
        qb.push(" WHERE t.id = ").push_bind(id);
        let row: Option<(Json<Row>,)> = qb.build_query_as().fetch_optional(&self.pool).await?;
        Ok(row.map(|(Json(row),)| row))
    }

    async fn select_first(&self, table: Table) -> Result<Option<Row>, DbError> {
        let mut qb = select_rows(table);
        qb.push(" ORDER BY t.id LIMIT 1");
        let row: Option<(Json<Row>,)> = qb.build_query_as().fetch_optional(&self.pool).await?;
        Ok(row.map(|(Json(row),)| row))
    }

    async fn insert(&self, table: Table, values: Assignments<'_>) -> Result<i64, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO ");
        qb.push(table.name()).push(" (");
        {
            let mut columns = qb.separated(", ");
            for (column, _) in values {
                columns.push(*column);
            }
        }
        qb.push(") VALUES (");
        {
            let mut binds = qb.separated(", ");
            for (_, value) in values {
                binds.push_bind(value.to_string());
            }
        }
        qb.push(") RETURNING id::bigint");

        let id = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(id)
    }

    async fn update_by_id(
        &self,
        table: Table,
        id: i64,
        values: Assignments<'_>,
    ) -> Result<u64, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE ");
        qb.push(table.name()).push(" SET ");
        {
            let mut sets = qb.separated(", ");
            for (column, value) in values {
                sets.push(*column)
                    .push_unseparated(" = ")
                    .push_bind_unseparated(value.to_string());
            }
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, table: Table, id: i64) -> Result<u64, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new("DELETE FROM ");
        qb.push(table.name()).push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListParams, SortOrder};

    // Integration tests require a real database with the contacts/reviews/
    // group_description tables already in place.
    // Run with: DATABASE_URL=postgres://... cargo test -p groupsite-server -- --ignored

    async fn gateway() -> PgGateway {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        PgGateway::connect(&url, DEFAULT_MAX_CONNECTIONS)
            .await
            .expect("connect failed")
    }

    #[test]
    fn select_sql_uses_static_identifiers() {
        let qb = select_rows(Table::Reviews);
        assert_eq!(qb.sql(), "SELECT to_jsonb(t) AS row FROM reviews t");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connect_reaches_database() {
        let gw = gateway().await;
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(gw.pool())
            .await
            .expect("query failed");
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn connect_reports_bad_url_as_db_error() {
        let err = PgGateway::connect("not-a-url", 1).await.err().expect("connect should fail");
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn contact_lifecycle() {
        let gw = gateway().await;
        let values = [("info_type", "email"), ("value", "lifecycle@example.com")];

        let id = gw.insert(Table::Contacts, &values).await.expect("insert failed");
        let row = gw
            .select_by_id(Table::Contacts, id)
            .await
            .expect("select failed")
            .expect("row missing");
        assert_eq!(row["value"], "lifecycle@example.com");

        let updated = [("info_type", "email"), ("value", "changed@example.com")];
        assert_eq!(gw.update_by_id(Table::Contacts, id, &updated).await.unwrap(), 1);

        assert_eq!(gw.delete_by_id(Table::Contacts, id).await.unwrap(), 1);
        assert_eq!(gw.delete_by_id(Table::Contacts, id).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn page_respects_window() {
        let gw = gateway().await;
        let total = gw.count(Table::Contacts).await.unwrap();

        let mut page = ListParams::default().into_page(Table::Contacts.sortable()).unwrap();
        page.order = SortOrder::Desc;
        let rows = gw.select_page(Table::Contacts, &page).await.unwrap();

        assert_eq!(rows.len() as i64, total.min(5));
    }
}
