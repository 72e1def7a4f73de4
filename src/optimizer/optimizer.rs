//! Query description optimizer
//!
//! Reorders the top-level conditions of a query description so that cheap,
//! selective conditions run first on backends without a query planner.
//!
//! - Pure: the input is never mutated, same input → same output
//! - Only `where` changes; sort, paging and join tables pass through
//! - `on` conditions on the same related table are merged into one

use super::config::OptimizerConfig;
use super::errors::{OptimizerError, OptimizerResult};
use super::explain::ExplainOptimization;
use super::reorder::{reorder, ScoredEntry};
use super::score::score;
use crate::observability::{log_event_with_fields, Event};
use crate::query::QueryDescription;
use crate::schema::SchemaLookup;

/// Reorders query descriptions against a read-only schema
pub struct QueryOptimizer<'a, S: SchemaLookup + ?Sized> {
    schema: &'a S,
    config: OptimizerConfig,
}

impl<'a, S: SchemaLookup + ?Sized> QueryOptimizer<'a, S> {
    /// Creates an optimizer with the default configuration
    pub fn new(schema: &'a S) -> Self {
        Self {
            schema,
            config: OptimizerConfig::default(),
        }
    }

    /// Replaces the configuration after validating its weights
    pub fn with_config(mut self, config: OptimizerConfig) -> OptimizerResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Returns a reordered copy of `query`.
    ///
    /// Fails only if `table` is not defined in the schema.
    pub fn optimize(&self, query: &QueryDescription, table: &str) -> OptimizerResult<QueryDescription> {
        self.optimize_owned(query.clone(), table)
    }

    /// Same as [`optimize`](Self::optimize), reusing the caller's allocation.
    pub fn optimize_owned(
        &self,
        mut query: QueryDescription,
        table: &str,
    ) -> OptimizerResult<QueryDescription> {
        if !self.config.enabled {
            log_event_with_fields(Event::OptimizeSkipped, &[("table", table)]);
            return Ok(query);
        }

        self.check_table(table)?;

        let conditions = std::mem::take(&mut query.conditions);
        let input_count = conditions.len();
        let entries = reorder(conditions, table, self.schema, &self.config.weights);

        let merged: usize = entries.iter().map(|e| e.merged).sum();
        query.conditions = entries.into_iter().map(|e| e.condition).collect();

        let input_str = input_count.to_string();
        let output_str = query.conditions.len().to_string();
        let merged_str = merged.to_string();
        log_event_with_fields(
            Event::OptimizeComplete,
            &[
                ("conditions_in", input_str.as_str()),
                ("conditions_out", output_str.as_str()),
                ("merged", merged_str.as_str()),
                ("table", table),
            ],
        );

        Ok(query)
    }

    /// Explains how `query` would be reordered.
    ///
    /// Never fails: a rejected query produces a rejected report.
    pub fn explain(&self, query: &QueryDescription, table: &str) -> ExplainOptimization {
        if !self.config.enabled {
            let entries: Vec<ScoredEntry> = query
                .conditions
                .iter()
                .enumerate()
                .map(|(position, condition)| ScoredEntry {
                    score: score(condition, table, self.schema, &self.config.weights),
                    condition: condition.clone(),
                    position,
                    merged: 0,
                })
                .collect();
            return ExplainOptimization::from_entries(table, false, &entries);
        }

        if let Err(err) = self.check_table(table) {
            return ExplainOptimization::from_error(table, &err);
        }

        let entries = reorder(
            query.conditions.clone(),
            table,
            self.schema,
            &self.config.weights,
        );
        ExplainOptimization::from_entries(table, true, &entries)
    }

    fn check_table(&self, table: &str) -> OptimizerResult<()> {
        if self.schema.has_table(table) {
            return Ok(());
        }

        let err = OptimizerError::unknown_table(table);
        log_event_with_fields(
            Event::OptimizeRejected,
            &[("code", err.code().code()), ("table", table)],
        );
        Err(err)
    }
}

/// Reorders `query` for `table` with the default configuration.
pub fn optimize_query_description<S: SchemaLookup + ?Sized>(
    query: &QueryDescription,
    table: &str,
    schema: &S,
) -> OptimizerResult<QueryDescription> {
    QueryOptimizer::new(schema).optimize(query, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::ScoreWeights;
    use crate::query::{Comparison, Condition, QueryBuilder, SortBy};
    use crate::schema::{AppSchema, ColumnSchema, TableSchema};
    use serde_json::json;

    fn schema() -> AppSchema {
        let tasks = TableSchema::new(
            "tasks",
            vec![
                ColumnSchema::string("str"),
                ColumnSchema::number("num"),
                ColumnSchema::boolean("bool"),
                ColumnSchema::string("str_i").indexed(),
                ColumnSchema::number("num_i").indexed(),
                ColumnSchema::boolean("bool_i").indexed(),
            ],
        )
        .unwrap();
        AppSchema::new(1, vec![tasks]).unwrap()
    }

    /// Optimizes and checks everything except `where` passed through.
    fn optimize(conditions: Vec<Condition>) -> Vec<Condition> {
        let query = QueryBuilder::new()
            .with_conditions(conditions)
            .with_sort(SortBy::desc("num"))
            .with_take(5)
            .build();
        let optimized = optimize_query_description(&query, "tasks", &schema()).unwrap();

        assert_eq!(
            QueryDescription { conditions: vec![], ..optimized.clone() },
            QueryDescription { conditions: vec![], ..query }
        );
        optimized.conditions
    }

    #[test]
    fn test_empty_query() {
        assert!(optimize(vec![]).is_empty());
    }

    #[test]
    fn test_does_not_reorder_unknown_profitability() {
        let orig = vec![
            Condition::where_eq("foo", json!("bar")),
            Condition::unsafe_sql(""),
            Condition::unsafe_loki(json!({})),
            Condition::or(vec![Condition::where_eq("foo", json!("bar"))]),
        ];
        assert_eq!(optimize(orig.clone()), orig);
    }

    #[test]
    fn test_merges_ons() {
        assert_eq!(
            optimize(vec![
                Condition::on_eq("table", "foo", json!("bar")),
                Condition::on(
                    "table",
                    vec![
                        Condition::where_eq("bar", json!("baz")),
                        Condition::where_eq("baz", json!("blah")),
                    ]
                ),
            ]),
            vec![Condition::on(
                "table",
                vec![
                    Condition::where_eq("foo", json!("bar")),
                    Condition::where_eq("bar", json!("baz")),
                    Condition::where_eq("baz", json!("blah")),
                ]
            )]
        );
    }

    #[test]
    fn test_reorders_ons_last() {
        assert_eq!(
            optimize(vec![
                Condition::on_eq("table", "foo", json!("bar")),
                Condition::where_eq("bar", json!("baz")),
            ]),
            vec![
                Condition::where_eq("bar", json!("baz")),
                Condition::on_eq("table", "foo", json!("bar")),
            ]
        );
    }

    #[test]
    fn test_reorders_indexed_before_unindexed() {
        assert_eq!(
            optimize(vec![
                Condition::where_eq("str", json!("bar")),
                Condition::where_eq("bool_i", json!("bar")),
                Condition::where_eq("str_i", json!("bar")),
            ]),
            vec![
                Condition::where_eq("bool_i", json!("bar")),
                Condition::where_eq("str_i", json!("bar")),
                Condition::where_eq("str", json!("bar")),
            ]
        );
    }

    #[test]
    fn test_reorders_eq_before_other_comparisons() {
        assert_eq!(
            optimize(vec![
                Condition::where_cmp("str", Comparison::gt(json!("bar"))),
                Condition::where_cmp("str", Comparison::not_eq(json!("bar"))),
                Condition::where_eq("str", json!("bar")),
            ]),
            vec![
                Condition::where_eq("str", json!("bar")),
                Condition::where_cmp("str", Comparison::gt(json!("bar"))),
                Condition::where_cmp("str", Comparison::not_eq(json!("bar"))),
            ]
        );
    }

    #[test]
    fn test_reorders_one_of_by_operand_count() {
        let one_of = |n: usize| Condition::where_cmp("str", Comparison::one_of(vec![json!("bar"); n]));
        assert_eq!(
            optimize(vec![
                one_of(10),
                one_of(2),
                one_of(5),
                Condition::where_eq("str", json!("bar")),
            ]),
            vec![
                Condition::where_eq("str", json!("bar")),
                one_of(2),
                one_of(5),
                one_of(10),
            ]
        );
    }

    #[test]
    fn test_builder_flattens_and() {
        assert_eq!(
            optimize(vec![
                Condition::where_eq("str", json!("bar")),
                Condition::and(vec![
                    Condition::where_eq("str", json!("bar2")),
                    Condition::and(vec![Condition::where_eq("str", json!("bar3"))]),
                ]),
            ]),
            vec![
                Condition::where_eq("str", json!("bar")),
                Condition::where_eq("str", json!("bar2")),
                Condition::where_eq("str", json!("bar3")),
            ]
        );
    }

    #[test]
    fn test_does_not_reorder_inside_and() {
        // Only the builder flattens; a raw description keeps its group.
        let group = Condition::and(vec![
            Condition::where_eq("str", json!("bar")),
            Condition::where_eq("bool_i", json!("bar")),
        ]);
        let query = QueryDescription::with_conditions(vec![group.clone()]);
        let optimized = optimize_query_description(&query, "tasks", &schema()).unwrap();

        assert_eq!(optimized.conditions, vec![group]);
    }

    #[test]
    fn test_unknown_table_fails_fast() {
        let query = QueryDescription::with_conditions(vec![Condition::where_eq("a", json!(1))]);
        let err = optimize_query_description(&query, "comments", &schema()).unwrap_err();

        assert_eq!(err.code().code(), "AERO_OPTIMIZE_UNKNOWN_TABLE");
        assert!(err.to_string().contains("comments"));
    }

    #[test]
    fn test_disabled_passes_through() {
        let query = QueryDescription::with_conditions(vec![
            Condition::on_eq("projects", "a", json!(1)),
            Condition::where_eq("str_i", json!(1)),
            Condition::on_eq("projects", "b", json!(2)),
        ]);
        let schema = schema();
        let optimizer = QueryOptimizer::new(&schema)
            .with_config(OptimizerConfig::disabled())
            .unwrap();

        assert_eq!(optimizer.optimize(&query, "tasks").unwrap(), query);
        // Disabled also skips the table check.
        assert_eq!(optimizer.optimize(&query, "comments").unwrap(), query);
    }

    #[test]
    fn test_with_config_rejects_invalid_weights() {
        let schema = schema();
        let invalid = [
            ScoreWeights {
                eq_multiplier: f64::NAN,
                ..ScoreWeights::default()
            },
            ScoreWeights {
                default_score: 0.0,
                ..ScoreWeights::default()
            },
            ScoreWeights {
                set_size_halfway: f64::INFINITY,
                ..ScoreWeights::default()
            },
            ScoreWeights {
                on_score: 0.01,
                ..ScoreWeights::default()
            },
        ];
        for weights in invalid {
            let config = OptimizerConfig {
                enabled: true,
                weights,
            };
            let err = QueryOptimizer::new(&schema).with_config(config).err().unwrap();
            assert_eq!(err.code().code(), "AERO_OPTIMIZE_INVALID_CONFIG");
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let query = QueryDescription::with_conditions(vec![
            Condition::on_eq("projects", "a", json!(1)),
            Condition::on_eq("projects", "b", json!(2)),
            Condition::where_eq("str", json!(1)),
        ]);
        let snapshot = query.clone();

        let _ = optimize_query_description(&query, "tasks", &schema()).unwrap();
        assert_eq!(query, snapshot);
    }

    #[test]
    fn test_explain_matches_optimize() {
        let schema = schema();
        let optimizer = QueryOptimizer::new(&schema);
        let query = QueryDescription::with_conditions(vec![
            Condition::on_eq("projects", "a", json!(1)),
            Condition::where_eq("str", json!("x")),
            Condition::on_eq("projects", "b", json!(2)),
        ]);

        let explain = optimizer.explain(&query, "tasks");
        assert!(explain.accepted);
        let positions: Vec<usize> = explain.entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 0]);
        assert_eq!(explain.entries[1].merged, 1);

        let rejected = optimizer.explain(&query, "comments");
        assert!(!rejected.accepted);
        assert_eq!(
            rejected.rejection_code.as_deref(),
            Some("AERO_OPTIMIZE_UNKNOWN_TABLE")
        );
    }
}
