//! Condition reordering subsystem for aeroquery
//!
//! Reorders the top-level conditions of a query description to lower
//! execution cost on backends that scan records without a query planner.
//!
//! # Pass (single level, no recursion)
//!
//! 1. Classify each condition (column, `on`, combinator, raw expression)
//! 2. Score it: lower is cheaper
//! 3. Merge `on` conditions on the same related table
//! 4. Stable sort by score
//!
//! # Guarantees
//!
//! - Deterministic: same inputs → same output
//! - The set of matched records is unchanged
//! - Equal scores keep their input order

mod config;
mod errors;
mod explain;
mod optimizer;
mod reorder;
mod score;

pub use config::OptimizerConfig;
pub use errors::{OptimizerError, OptimizerErrorCode, OptimizerResult};
pub use explain::{ExplainEntry, ExplainOptimization};
pub use optimizer::{optimize_query_description, QueryOptimizer};
pub use score::{
    score, ScoreWeights, DEFAULT_SCORE, EQ_MULTIPLIER, INDEXED_MULTIPLIER, ON_MULTIPLIER,
    SET_SIZE_HALFWAY,
};
