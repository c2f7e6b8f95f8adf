//! Report generation.
//!
//! This module turns catalog metadata into the markdown document and
//! persists it:
//! - `markdown`: section/row templates and the builder loop
//! - `writer`: output file handling

pub mod markdown;
pub mod writer;

pub use markdown::{MarkdownReport, build_report, render_column_row, render_table_header};
pub use writer::write_report;
