//! QueryGateway - the seam between handlers and the relational store
//!
//! Operations are table-level and parameterized. Table and column
//! identifiers only ever come from [`Table`], so no request text is
//! interpolated into SQL.

use async_trait::async_trait;

use crate::models::{PageRequest, Row};

/// Tables exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Contacts,
    GroupDescription,
    Reviews,
}

impl Table {
    pub const ALL: [Table; 3] = [Self::Contacts, Self::GroupDescription, Self::Reviews];

    /// SQL table name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::GroupDescription => "group_description",
            Self::Reviews => "reviews",
        }
    }

    /// Resource name used in `Content-Range` headers and error messages
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::GroupDescription => "group-description",
            Self::Reviews => "reviews",
        }
    }

    /// Columns a list request may sort by.
    ///
    /// Review columns belong to whoever writes that table, so only the key is
    /// guaranteed. Group description has no list route.
    pub fn sortable(&self) -> &'static [&'static str] {
        match self {
            Self::Contacts => &["id", "info_type", "value"],
            Self::GroupDescription | Self::Reviews => &["id"],
        }
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn not_found(table: Table, id: i64) -> Self {
        Self::NotFound {
            resource: table.resource(),
            id: id.to_string(),
        }
    }
}

/// Column/value pairs for INSERT and UPDATE
pub type Assignments<'a> = &'a [(&'static str, &'a str)];

/// Parameterized query execution against the relational store
#[async_trait]
pub trait QueryGateway: Send + Sync {
    /// `SELECT COUNT(*)`
    async fn count(&self, table: Table) -> Result<i64, DbError>;

    /// One ordered page of rows
    async fn select_page(&self, table: Table, page: &PageRequest) -> Result<Vec<Row>, DbError>;

    /// Every row, ordered by id
    async fn select_all(&self, table: Table) -> Result<Vec<Row>, DbError>;

    async fn select_by_id(&self, table: Table, id: i64) -> Result<Option<Row>, DbError>;

    /// Row with the lowest id
    async fn select_first(&self, table: Table) -> Result<Option<Row>, DbError>;

    /// Insert a row, returning the generated id
    async fn insert(&self, table: Table, values: Assignments<'_>) -> Result<i64, DbError>;

    /// Returns the number of affected rows
    async fn update_by_id(
        &self,
        table: Table,
        id: i64,
        values: Assignments<'_>,
    ) -> Result<u64, DbError>;

    /// Returns the number of affected rows
    async fn delete_by_id(&self, table: Table, id: i64) -> Result<u64, DbError>;
}
