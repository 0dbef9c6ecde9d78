//! In-process gateway
//!
//! Backs the router in tests and in `serve --in-memory`. Ordering follows
//! PostgreSQL defaults: NULLs sort last ascending and first descending.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::gateway::{Assignments, DbError, QueryGateway, Table};
use crate::models::{PageRequest, Row, SortOrder};

#[derive(Default)]
struct Tables {
    rows: HashMap<Table, BTreeMap<i64, Row>>,
    next_id: HashMap<Table, i64>,
}

impl Tables {
    fn table(&mut self, table: Table) -> &mut BTreeMap<i64, Row> {
        self.rows.entry(table).or_default()
    }

    fn allocate_id(&mut self, table: Table) -> i64 {
        let next = self.next_id.entry(table).or_insert(1);
        let id = *next;
        *next += 1;
        id
    }

    fn reserve_id(&mut self, table: Table, id: i64) {
        let next = self.next_id.entry(table).or_insert(1);
        if *next <= id {
            *next = id + 1;
        }
    }
}

/// [`QueryGateway`] holding rows in memory
#[derive(Default)]
pub struct MemoryGateway {
    tables: Mutex<Tables>,
    failure: Option<String>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose every query fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            tables: Mutex::default(),
            failure: Some(message.into()),
        }
    }

    /// Insert a row as-is, keeping its `id` if it has one.
    pub fn seed(&self, table: Table, mut row: Row) -> i64 {
        let mut tables = self.lock();
        let id = match row.get("id").and_then(Value::as_i64) {
            Some(id) => {
                tables.reserve_id(table, id);
                id
            }
            None => tables.allocate_id(table),
        };
        row.insert("id".into(), Value::from(id));
        tables.table(table).insert(id, row);
        id
    }

    /// Snapshot of a table, ordered by id
    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.lock().table(table).values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(&self) -> Result<(), DbError> {
        match &self.failure {
            Some(message) => Err(DbError::Gateway(message.clone())),
            None => Ok(()),
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

/// Ascending comparison with NULL (or a missing column) last
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn row_id(row: &Row) -> i64 {
    row.get("id").and_then(Value::as_i64).unwrap_or_default()
}

#[async_trait]
impl QueryGateway for MemoryGateway {
    async fn count(&self, table: Table) -> Result<i64, DbError> {
        self.check()?;
        Ok(self.lock().table(table).len() as i64)
    }

    async fn select_page(&self, table: Table, page: &PageRequest) -> Result<Vec<Row>, DbError> {
        self.check()?;
        let mut rows: Vec<Row> = self.lock().table(table).values().cloned().collect();

        rows.sort_by(|a, b| {
            let ordering = compare_values(a.get(page.sort), b.get(page.sort));
            let ordering = match page.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            ordering.then_with(|| row_id(a).cmp(&row_id(b)))
        });

        Ok(rows
            .into_iter()
            .skip(page.window.offset() as usize)
            .take(page.window.limit() as usize)
            .collect())
    }

    async fn select_all(&self, table: Table) -> Result<Vec<Row>, DbError> {
        self.check()?;
        Ok(self.rows(table))
    }

    async fn select_by_id(&self, table: Table, id: i64) -> Result<Option<Row>, DbError> {
        self.check()?;
        Ok(self.lock().table(table).get(&id).cloned())
    }

    async fn select_first(&self, table: Table) -> Result<Option<Row>, DbError> {
        self.check()?;
        Ok(self.lock().table(table).values().next().cloned())
    }

    async fn insert(&self, table: Table, values: Assignments<'_>) -> Result<i64, DbError> {
        self.check()?;
        let mut tables = self.lock();
        let id = tables.allocate_id(table);

        let mut row = Row::new();
        row.insert("id".into(), Value::from(id));
        for (column, value) in values {
            row.insert((*column).into(), Value::from(*value));
        }
        tables.table(table).insert(id, row);
        Ok(id)
    }

    async fn update_by_id(
        &self,
        table: Table,
        id: i64,
        values: Assignments<'_>,
    ) -> Result<u64, DbError> {
        self.check()?;
        let mut tables = self.lock();
        let Some(row) = tables.table(table).get_mut(&id) else {
            return Ok(0);
        };
        for (column, value) in values {
            row.insert((*column).into(), Value::from(*value));
        }
        Ok(1)
    }

    async fn delete_by_id(&self, table: Table, id: i64) -> Result<u64, DbError> {
        self.check()?;
        let removed = self.lock().table(table).remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
