//! Explain output for the reorder pass
//!
//! Deterministic, human-readable (Display) and JSON-serializable.

use std::fmt;

use serde::Serialize;

use super::errors::OptimizerError;
use super::reorder::ScoredEntry;
use crate::query::{Condition, ConditionShape};

/// One output entry of the reorder pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainEntry {
    /// Index of the condition in the input list
    pub position: usize,
    pub shape: ConditionShape,
    pub score: f64,
    /// Number of later `on` conditions merged into this one
    pub merged: usize,
    /// Short description, e.g. `str eq` or `on projects (2 conditions)`
    pub summary: String,
}

/// Explain report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainOptimization {
    pub table: String,
    /// Whether the table was found and the pass ran
    pub accepted: bool,
    /// Whether conditions were reordered (false when disabled)
    pub reordered: bool,
    /// Entries in output order
    pub entries: Vec<ExplainEntry>,
    /// Rejection reason (if rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_code: Option<String>,
}

impl ExplainOptimization {
    pub(crate) fn from_entries(table: &str, reordered: bool, entries: &[ScoredEntry]) -> Self {
        Self {
            table: table.to_string(),
            accepted: true,
            reordered,
            entries: entries
                .iter()
                .map(|e| ExplainEntry {
                    position: e.position,
                    shape: e.condition.shape(),
                    score: e.score,
                    merged: e.merged,
                    summary: summarize(&e.condition),
                })
                .collect(),
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates a rejected report from an optimizer error
    pub fn from_error(table: &str, err: &OptimizerError) -> Self {
        Self {
            table: table.to_string(),
            accepted: false,
            reordered: false,
            entries: Vec::new(),
            rejection_reason: Some(err.to_string()),
            rejection_code: Some(err.code().code().to_string()),
        }
    }
}

fn summarize(condition: &Condition) -> String {
    match condition {
        Condition::Where(c) => format!("{} {}", c.left, c.comparison.operator.as_str()),
        Condition::On(on) => format!("on {} ({} conditions)", on.table, on.conditions.len()),
        Condition::And { conditions } => format!("and ({} conditions)", conditions.len()),
        Condition::Or { conditions } => format!("or ({} conditions)", conditions.len()),
        Condition::Sql { .. } => "sql".to_string(),
        Condition::Loki { .. } => "loki".to_string(),
    }
}

impl fmt::Display for ExplainOptimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN OPTIMIZE ===")?;
        writeln!(f, "Table: {}", self.table)?;

        if !self.accepted {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
            return Ok(());
        }

        if self.reordered {
            writeln!(f, "Status: REORDERED")?;
        } else {
            writeln!(f, "Status: DISABLED")?;
        }

        for entry in &self.entries {
            write!(
                f,
                "  #{} {:<10} score={:.4} {}",
                entry.position,
                entry.shape.as_str(),
                entry.score,
                entry.summary
            )?;
            if entry.merged > 0 {
                write!(f, " [merged {}]", entry.merged)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
