//! Data models for db-doc.
//!
//! This module re-exports the catalog descriptor types used throughout the application.

pub mod schema;

pub use schema::{ColumnDescriptor, TableDescriptor};
