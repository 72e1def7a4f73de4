//! Single-level reorder pass
//!
//! 1. Score every top-level condition
//! 2. Merge `on` conditions targeting the same table into the first one seen
//! 3. Stable sort by ascending score
//!
//! Nothing below the top level is inspected: nested lists of `on`, `and`
//! and `or` keep their order.

use std::collections::BTreeMap;

use super::score::{score, ScoreWeights};
use crate::query::Condition;
use crate::schema::SchemaLookup;

/// A condition with its score, alive only for one pass
#[derive(Debug, Clone)]
pub(crate) struct ScoredEntry {
    pub condition: Condition,
    pub score: f64,
    /// Index of the condition in the input list
    pub position: usize,
    /// Number of later `on` conditions folded into this one
    pub merged: usize,
}

/// Scores, merges and sorts `conditions`.
///
/// Entries live in an arena; `ons` maps a related table to the arena slot of
/// its first `on`, so a merge never moves or rescores that slot.
pub(crate) fn reorder<S: SchemaLookup + ?Sized>(
    conditions: Vec<Condition>,
    table: &str,
    schema: &S,
    weights: &ScoreWeights,
) -> Vec<ScoredEntry> {
    let mut entries: Vec<ScoredEntry> = Vec::with_capacity(conditions.len());
    let mut ons: BTreeMap<String, usize> = BTreeMap::new();

    for (position, condition) in conditions.into_iter().enumerate() {
        let condition = match condition {
            Condition::On(on) => match ons.get(&on.table).copied() {
                Some(slot) => {
                    let entry = &mut entries[slot];
                    if let Condition::On(existing) = &mut entry.condition {
                        existing.conditions.extend(on.conditions);
                    }
                    entry.merged += 1;
                    continue;
                }
                None => {
                    ons.insert(on.table.clone(), entries.len());
                    Condition::On(on)
                }
            },
            other => other,
        };

        entries.push(ScoredEntry {
            score: score(&condition, table, schema, weights),
            condition,
            position,
            merged: 0,
        });
    }

    // `sort_by` is stable: equal scores keep input order.
    entries.sort_by(|a, b| a.score.total_cmp(&b.score));
    entries
}
