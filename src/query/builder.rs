//! Query description builder
//!
//! Collects clauses in call order and assembles a [`QueryDescription`].
//! Top-level `and` groups are flattened here, not in the optimizer.

use super::ast::{Condition, QueryDescription, SortBy};

/// Builds a query description from clauses
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    conditions: Vec<Condition>,
    sort_by: Vec<SortBy>,
    take: Option<u64>,
    skip: Option<u64>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds several conditions, preserving their order
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Adds a sort clause
    pub fn with_sort(mut self, sort: SortBy) -> Self {
        self.sort_by.push(sort);
        self
    }

    /// Sets the maximum number of records
    pub fn with_take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    /// Sets the number of records to skip
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Assembles the description.
    ///
    /// `and` groups at the top level are spliced into the top-level list,
    /// recursively. Groups nested under `or` or `on` are kept as written.
    pub fn build(self) -> QueryDescription {
        let mut conditions = Vec::with_capacity(self.conditions.len());
        flatten_and_into(self.conditions, &mut conditions);

        let mut join_tables: Vec<String> = Vec::new();
        for condition in &conditions {
            if let Condition::On(on) = condition {
                if !join_tables.contains(&on.table) {
                    join_tables.push(on.table.clone());
                }
            }
        }

        QueryDescription {
            conditions,
            join_tables,
            sort_by: self.sort_by,
            take: self.take,
            skip: self.skip,
        }
    }
}

fn flatten_and_into(conditions: Vec<Condition>, out: &mut Vec<Condition>) {
    for condition in conditions {
        match condition {
            Condition::And { conditions } => flatten_and_into(conditions, out),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ast::Comparison;
    use serde_json::json;

    #[test]
    fn test_flattens_top_level_and() {
        let query = QueryBuilder::new()
            .with_condition(Condition::where_eq("str", json!("bar")))
            .with_condition(Condition::and(vec![
                Condition::where_eq("str", json!("bar2")),
                Condition::and(vec![Condition::where_eq("str", json!("bar3"))]),
            ]))
            .build();

        assert_eq!(
            query.conditions,
            vec![
                Condition::where_eq("str", json!("bar")),
                Condition::where_eq("str", json!("bar2")),
                Condition::where_eq("str", json!("bar3")),
            ]
        );
    }

    #[test]
    fn test_and_inside_or_kept() {
        let nested = Condition::or(vec![
            Condition::and(vec![Condition::where_eq("a", json!(1))]),
            Condition::where_cmp("b", Comparison::gt(json!(2))),
        ]);
        let query = QueryBuilder::new().with_condition(nested.clone()).build();

        assert_eq!(query.conditions, vec![nested]);
    }

    #[test]
    fn test_join_tables_first_seen_order() {
        let query = QueryBuilder::new()
            .with_condition(Condition::on_eq("projects", "name", json!("p")))
            .with_condition(Condition::on_eq("tags", "name", json!("t")))
            .with_condition(Condition::on_eq("projects", "archived", json!(false)))
            .build();

        assert_eq!(query.join_tables, vec!["projects", "tags"]);
    }

    #[test]
    fn test_carries_sort_take_skip() {
        let query = QueryBuilder::new()
            .with_sort(SortBy::asc("position"))
            .with_take(20)
            .with_skip(40)
            .build();

        assert!(query.conditions.is_empty());
        assert_eq!(query.sort_by, vec![SortBy::asc("position")]);
        assert_eq!(query.take, Some(20));
        assert_eq!(query.skip, Some(40));
    }
}
