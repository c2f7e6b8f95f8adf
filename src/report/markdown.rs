//! Markdown rendering.
//!
//! The layout is fixed: three blank lines, a `###` heading, then a five-column
//! table with one row per column. Output must stay byte-for-byte identical
//! across releases.

use crate::db::Catalog;
use crate::error::DocResult;
use crate::models::{ColumnDescriptor, TableDescriptor};
use tracing::debug;

const TABLE_COLUMNS_HEADER: &str = "| 序号 | 字段名称 | 数据类型 | 是否为空 | 字段说明 |\n";
const TABLE_COLUMNS_SEPARATOR: &str = "| :--: |----| ---- | ---- | ---- |\n";

/// Render the section header block for one table.
pub fn render_table_header(table: &TableDescriptor) -> String {
    format!(
        "\n\n\n### {} \n{}{}",
        table.header(),
        TABLE_COLUMNS_HEADER,
        TABLE_COLUMNS_SEPARATOR
    )
}

/// Render one column row. Nullability is printed as the catalog reported it.
pub fn render_column_row(column: &ColumnDescriptor) -> String {
    format!(
        "| {} | {} | {} | {} | {} |\n",
        column.ordinal_position,
        column.name,
        column.column_type,
        column.is_nullable,
        column.comment
    )
}

/// The document being built, plus counters for the completion log.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReport {
    content: String,
    table_count: usize,
    column_count: usize,
}

impl MarkdownReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table section. Columns are emitted in ascending ordinal position
    /// whatever order they arrive in.
    pub fn push_table(&mut self, table: &TableDescriptor, mut columns: Vec<ColumnDescriptor>) {
        columns.sort_by_key(|c| c.ordinal_position);

        self.content.push_str(&render_table_header(table));
        for column in &columns {
            self.content.push_str(&render_column_row(column));
        }

        self.table_count += 1;
        self.column_count += columns.len();
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    pub fn table_count(&self) -> usize {
        self.table_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Build the whole document for `schema` in memory.
///
/// Tables are visited in the order the catalog lists them; the first failing
/// lookup aborts the build.
pub async fn build_report<C: Catalog>(catalog: &C, schema: &str) -> DocResult<MarkdownReport> {
    let tables = catalog.list_tables(schema).await?;
    debug!(schema, count = tables.len(), "Listed tables");

    let mut report = MarkdownReport::new();
    for table in &tables {
        let columns = catalog.list_columns(schema, &table.name).await?;
        debug!(table = %table.name, columns = columns.len(), "Rendering table");
        report.push_table(table, columns);
    }

    Ok(report)
}
