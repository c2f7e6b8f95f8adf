//! End-to-end run: validate, connect, build, write.

use crate::config::Config;
use crate::db::{Catalog, MySqlCatalog};
use crate::error::DocResult;
use crate::report::{build_report, write_report};
use std::path::{Path, PathBuf};
use tracing::info;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub output: PathBuf,
    pub tables: usize,
    pub columns: usize,
    pub bytes: usize,
}

/// Build the document for `schema` from `catalog` and write it to `output`.
///
/// Nothing is written unless every catalog lookup succeeded.
pub async fn generate<C: Catalog>(
    catalog: &C,
    schema: &str,
    output: &Path,
) -> DocResult<ReportSummary> {
    let report = build_report(catalog, schema).await?;
    write_report(output, report.as_str()).await?;

    Ok(ReportSummary {
        output: output.to_path_buf(),
        tables: report.table_count(),
        columns: report.column_count(),
        bytes: report.len(),
    })
}

/// Run db-doc with the given configuration.
///
/// Inputs are validated before any connection is attempted.
pub async fn run(config: &Config) -> DocResult<ReportSummary> {
    let target = config.validate()?;

    info!(
        dsn = %target.data_source.masked(),
        schema = %target.schema,
        output = %target.output.display(),
        "Generating schema documentation"
    );

    let catalog = MySqlCatalog::connect(
        &target.data_source,
        config.connect_timeout_duration(),
        config.slow_query_threshold(),
    )
    .await?;
    let result = generate(&catalog, &target.schema, &target.output).await;
    catalog.close().await;

    result
}
