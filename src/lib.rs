//! db-doc library
//!
//! Reads table and column metadata for one MySQL schema from
//! `information_schema` and renders it as a markdown document.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod report;
pub mod runner;

pub use config::Config;
pub use error::{DocError, DocResult};
pub use runner::{ReportSummary, generate, run};
