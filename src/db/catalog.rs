//! Catalog access.
//!
//! The report builder only needs two questions answered: which base tables
//! live in a schema, and which columns a table has. [`Catalog`] captures
//! exactly that, and [`MySqlCatalog`] answers it from `information_schema`
//! with parameterized queries.

use crate::config::DataSource;
use crate::db::pool;
use crate::error::{DocError, DocResult};
use crate::models::{ColumnDescriptor, TableDescriptor};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Read-only view of a database's table and column metadata.
pub trait Catalog {
    /// Base tables (views excluded) of `schema`, in catalog order.
    /// An unknown schema yields an empty list.
    fn list_tables(
        &self,
        schema: &str,
    ) -> impl Future<Output = DocResult<Vec<TableDescriptor>>> + Send;

    /// Columns of one table, ascending by ordinal position.
    /// A table that no longer exists yields an empty list.
    fn list_columns(
        &self,
        schema: &str,
        table: &str,
    ) -> impl Future<Output = DocResult<Vec<ColumnDescriptor>>> + Send;
}

mod queries {
    pub const LIST_TABLES: &str = r#"
        SELECT
            CONVERT(TABLE_NAME USING utf8mb4) AS TABLE_NAME,
            CONVERT(TABLE_COMMENT USING utf8mb4) AS TABLE_COMMENT
        FROM information_schema.TABLES
        WHERE TABLE_TYPE = 'BASE TABLE'
        AND TABLE_SCHEMA = ?
        ORDER BY TABLE_NAME
        "#;

    pub const LIST_COLUMNS: &str = r#"
        SELECT
            ORDINAL_POSITION,
            CONVERT(COLUMN_NAME USING utf8mb4) AS COLUMN_NAME,
            CONVERT(COLUMN_TYPE USING utf8mb4) AS COLUMN_TYPE,
            CONVERT(IS_NULLABLE USING utf8mb4) AS IS_NULLABLE,
            CONVERT(COLUMN_COMMENT USING utf8mb4) AS COLUMN_COMMENT
        FROM information_schema.COLUMNS
        WHERE TABLE_SCHEMA = ?
        AND TABLE_NAME = ?
        ORDER BY ORDINAL_POSITION
        "#;
}

/// Read a text column from a MySQL row.
/// MySQL may return VARBINARY instead of VARCHAR depending on charset configuration.
fn read_text(row: &MySqlRow, column: &str) -> Option<String> {
    row.try_get::<Option<String>, _>(column)
        .ok()
        .flatten()
        .or_else(|| {
            row.try_get::<Option<Vec<u8>>, _>(column)
                .ok()
                .flatten()
                .and_then(|bytes| String::from_utf8(bytes).ok())
        })
}

/// A value that must be present and non-empty (names, types, nullability).
fn require_text(value: Option<String>, column: &str, operation: &str) -> DocResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DocError::query(operation, format!("{} unreadable", column), None))
}

/// Comments are optional; NULL or undecodable reads as empty.
fn optional_text(row: &MySqlRow, column: &str) -> String {
    read_text(row, column).unwrap_or_default()
}

fn to_position<T: TryInto<u32>>(value: T) -> Option<u32> {
    value.try_into().ok().filter(|p| *p > 0)
}

/// Get an ordinal position, handling MySQL version differences.
/// MySQL 5.x reports BIGINT UNSIGNED, 8.x reports INT UNSIGNED.
fn get_position(row: &MySqlRow, column: &str) -> Option<u32> {
    if let Ok(v) = row.try_get::<u32, _>(column) {
        return to_position(v);
    }
    if let Ok(v) = row.try_get::<u64, _>(column) {
        return to_position(v);
    }
    if let Ok(v) = row.try_get::<i64, _>(column) {
        return to_position(v);
    }
    None
}

fn is_slow(elapsed: Duration, threshold: Duration) -> bool {
    elapsed >= threshold
}

/// Catalog backed by a MySQL `information_schema` session.
#[derive(Debug, Clone)]
pub struct MySqlCatalog {
    pool: MySqlPool,
    slow_query_threshold: Duration,
}

impl MySqlCatalog {
    /// Wrap an existing pool.
    pub fn new(pool: MySqlPool, slow_query_threshold: Duration) -> Self {
        Self {
            pool,
            slow_query_threshold,
        }
    }

    /// Connect to the data source and log the server version.
    pub async fn connect(
        data_source: &DataSource,
        connect_timeout: Duration,
        slow_query_threshold: Duration,
    ) -> DocResult<Self> {
        let pool = pool::open_pool(data_source, connect_timeout).await?;
        let server_version = pool::server_version(&pool).await;
        info!(server_version = ?server_version, "Connected successfully");
        Ok(Self::new(pool, slow_query_threshold))
    }

    /// Close the underlying connection.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Connection closed");
    }

    fn log_query(
        &self,
        operation: &str,
        schema: &str,
        table: Option<&str>,
        rows: usize,
        started: Instant,
    ) {
        let elapsed = started.elapsed();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if is_slow(elapsed, self.slow_query_threshold) {
            warn!(operation, schema, table = ?table, rows, elapsed_ms, "Slow catalog query");
        } else {
            debug!(operation, schema, table = ?table, rows, elapsed_ms, "Catalog query");
        }
    }
}

impl Catalog for MySqlCatalog {
    async fn list_tables(&self, schema: &str) -> DocResult<Vec<TableDescriptor>> {
        let operation = format!("list tables of '{}'", schema);
        let started = Instant::now();
        let rows = sqlx::query(queries::LIST_TABLES)
            .bind(schema)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DocError::from(e).during(operation.clone()))?;

        let tables = rows
            .iter()
            .map(|row| -> DocResult<TableDescriptor> {
                let name = require_text(read_text(row, "TABLE_NAME"), "TABLE_NAME", &operation)?;
                Ok(TableDescriptor::new(name).with_comment(optional_text(row, "TABLE_COMMENT")))
            })
            .collect::<DocResult<Vec<_>>>()?;

        self.log_query("list_tables", schema, None, tables.len(), started);
        Ok(tables)
    }

    async fn list_columns(&self, schema: &str, table: &str) -> DocResult<Vec<ColumnDescriptor>> {
        let operation = format!("list columns of '{}.{}'", schema, table);
        let started = Instant::now();
        let rows = sqlx::query(queries::LIST_COLUMNS)
            .bind(schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DocError::from(e).during(operation.clone()))?;

        let mut columns = rows
            .iter()
            .map(|row| -> DocResult<ColumnDescriptor> {
                let name = require_text(read_text(row, "COLUMN_NAME"), "COLUMN_NAME", &operation)?;
                let position = get_position(row, "ORDINAL_POSITION").ok_or_else(|| {
                    DocError::query(
                        operation.clone(),
                        format!("ORDINAL_POSITION of column '{}' unreadable", name),
                        None,
                    )
                })?;
                let column_type = require_text(
                    read_text(row, "COLUMN_TYPE"),
                    &format!("COLUMN_TYPE of column '{}'", name),
                    &operation,
                )?;
                let is_nullable = require_text(
                    read_text(row, "IS_NULLABLE"),
                    &format!("IS_NULLABLE of column '{}'", name),
                    &operation,
                )?;
                Ok(
                    ColumnDescriptor::new(position, name, column_type, is_nullable)
                        .with_comment(optional_text(row, "COLUMN_COMMENT")),
                )
            })
            .collect::<DocResult<Vec<_>>>()?;

        columns.sort_by_key(|c| c.ordinal_position);

        self.log_query("list_columns", schema, Some(table), columns.len(), started);
        Ok(columns)
    }
}
