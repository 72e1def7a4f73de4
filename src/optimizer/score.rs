//! Condition cost scoring
//!
//! Lower score = evaluated earlier. A column comparison scores
//! `default * indexed * operator`; every factor is a plain multiplier so new
//! ones compose without re-ranking.
//!
//! | shape                      | score                         |
//! |----------------------------|-------------------------------|
//! | column comparison          | 1.0 × (0.1 if indexed) × op   |
//! | related table (`on`)       | 5.0                           |
//! | combinator / raw expr      | 1.0                           |
//!
//! Operator factor: `eq` 0.5, anything else 1.0. `oneOf`/`notIn` rise from
//! the equality factor towards 1.0 as the operand count `n` grows:
//!
//! ```text
//! 1 - (1 - eq) × h / (h + max(n, 1))        h = 10
//! ```
//!
//! The set factor stays strictly between `eq` and 1.0, so a column comparison
//! never scores above `default`, and related-table conditions stay last.

use serde::{Deserialize, Serialize};

use crate::query::{ColumnComparison, Comparison, Condition};
use crate::schema::SchemaLookup;

/// Score of an unindexed non-equality comparison and of opaque conditions
pub const DEFAULT_SCORE: f64 = 1.0;
/// Indexed columns are cheap to look up
pub const INDEXED_MULTIPLIER: f64 = 0.1;
/// Equality yields fewer matches than range comparisons
pub const EQ_MULTIPLIER: f64 = 0.5;
/// Related-table conditions need a second table scan
pub const ON_MULTIPLIER: f64 = 5.0;
/// Operand count at which the set factor sits halfway between `eq` and 1.0
pub const SET_SIZE_HALFWAY: f64 = 10.0;

/// Tunable scoring constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub default_score: f64,
    pub indexed_multiplier: f64,
    pub eq_multiplier: f64,
    pub on_score: f64,
    pub set_size_halfway: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            default_score: DEFAULT_SCORE,
            indexed_multiplier: INDEXED_MULTIPLIER,
            eq_multiplier: EQ_MULTIPLIER,
            on_score: ON_MULTIPLIER,
            set_size_halfway: SET_SIZE_HALFWAY,
        }
    }
}

impl ScoreWeights {
    /// Operator factor of a comparison
    pub fn operator_multiplier(&self, comparison: &Comparison) -> f64 {
        if comparison.operator.is_equality() {
            self.eq_multiplier
        } else if comparison.operator.is_set_membership() {
            let operands = comparison.right.operand_count().max(1) as f64;
            let remaining = self.set_size_halfway / (self.set_size_halfway + operands);
            1.0 - (1.0 - self.eq_multiplier) * remaining
        } else {
            1.0
        }
    }
}

/// Scores one condition of `table`.
///
/// Columns missing from the schema count as unindexed.
pub fn score<S: SchemaLookup + ?Sized>(
    condition: &Condition,
    table: &str,
    schema: &S,
    weights: &ScoreWeights,
) -> f64 {
    match condition {
        Condition::Where(comparison) => column_score(comparison, table, schema, weights),
        Condition::On(_) => weights.on_score,
        Condition::And { .. }
        | Condition::Or { .. }
        | Condition::Sql { .. }
        | Condition::Loki { .. } => weights.default_score,
    }
}

fn column_score<S: SchemaLookup + ?Sized>(
    comparison: &ColumnComparison,
    table: &str,
    schema: &S,
    weights: &ScoreWeights,
) -> f64 {
    let is_indexed = schema
        .lookup_column(table, &comparison.left)
        .is_some_and(|column| column.is_indexed);
    let indexed = if is_indexed {
        weights.indexed_multiplier
    } else {
        1.0
    };

    weights.default_score * indexed * weights.operator_multiplier(&comparison.comparison)
}
