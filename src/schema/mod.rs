//! Schema registry subsystem for aeroquery
//!
//! Describes tables and columns, and which columns are indexed. The
//! optimizer reads it through the [`SchemaLookup`] trait only.
//!
//! # Rules
//!
//! - Unknown columns are not an error: they are treated as unindexed
//! - Table and column names are unique
//! - `id`, `_status` and `_changed` are reserved column names

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{AppSchema, ColumnSchema, ColumnType, SchemaLookup, TableSchema, RESERVED_COLUMNS};
