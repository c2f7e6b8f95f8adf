//! In-memory catalog.
//!
//! Serves canned table and column metadata without a database. Columns are
//! returned in insertion order, unsorted, so callers that rely on ordinal
//! ordering have to sort for themselves.

use crate::db::Catalog;
use crate::error::{DocError, DocResult};
use crate::models::{ColumnDescriptor, TableDescriptor};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
struct TableEntry {
    table: TableDescriptor,
    columns: Vec<ColumnDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    schemas: HashMap<String, Vec<TableEntry>>,
    /// Tables whose column lookup fails, keyed by (schema, table)
    failing: HashSet<(String, String)>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with its columns to `schema`. Tables are listed in insertion order.
    pub fn with_table(
        mut self,
        schema: impl Into<String>,
        table: TableDescriptor,
        columns: Vec<ColumnDescriptor>,
    ) -> Self {
        self.schemas
            .entry(schema.into())
            .or_default()
            .push(TableEntry { table, columns });
        self
    }

    /// Make the column lookup for one table fail with a query error.
    pub fn with_failing_table(
        mut self,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        self.failing.insert((schema.into(), table.into()));
        self
    }
}

impl Catalog for MemoryCatalog {
    async fn list_tables(&self, schema: &str) -> DocResult<Vec<TableDescriptor>> {
        Ok(self
            .schemas
            .get(schema)
            .map(|entries| entries.iter().map(|e| e.table.clone()).collect())
            .unwrap_or_default())
    }

    async fn list_columns(&self, schema: &str, table: &str) -> DocResult<Vec<ColumnDescriptor>> {
        if self
            .failing
            .contains(&(schema.to_string(), table.to_string()))
        {
            return Err(DocError::query(
                format!("list columns of '{}.{}'", schema, table),
                "Lost connection to MySQL server during query",
                Some("HY000".to_string()),
            ));
        }

        Ok(self
            .schemas
            .get(schema)
            .and_then(|entries| entries.iter().find(|e| e.table.name == table))
            .map(|e| e.columns.clone())
            .unwrap_or_default())
    }
}
