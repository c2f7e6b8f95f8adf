//! Database access layer.
//!
//! This module provides read-only access to the metadata catalog:
//! - The `Catalog` interface used by the report builder
//! - The MySQL `information_schema` implementation
//! - An in-memory implementation for tests and dry runs
//! - Connection setup from a parsed DSN

pub mod catalog;
pub mod memory;
pub mod pool;

pub use catalog::{Catalog, MySqlCatalog};
pub use memory::MemoryCatalog;
