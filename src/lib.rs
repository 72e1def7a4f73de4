//! aeroquery - Deterministic condition reordering for query descriptions
//!
//! Reorders the top-level conditions of a query so that backends without a
//! query planner (in-memory scanning stores) evaluate cheap, selective
//! conditions first. Indexed columns, equality and small sets go early;
//! related-table conditions go last.

pub mod observability;
pub mod optimizer;
pub mod query;
pub mod schema;
