//! Query description subsystem for aeroquery
//!
//! A [`QueryDescription`] is an ordered list of top-level conditions for one
//! table plus sort and paging fields. Builders produce it, the optimizer
//! reorders it, executors consume it.
//!
//! # Condition shapes
//!
//! - `where`: column comparison
//! - `on`: condition on a related table, with its own condition list
//! - `and` / `or`: logical combinators
//! - `sql` / `loki`: raw backend expressions, never inspected

mod ast;
mod builder;

pub use ast::{
    ColumnComparison, Comparison, ComparisonRight, Condition, ConditionShape, Operator,
    QueryDescription, RelatedCondition, SortBy, SortOrder,
};
pub use builder::QueryBuilder;
