//! Query description structures
//!
//! A query description is the builder's output and the executor's input.
//! Conditions form a closed sum type so every consumer matches exhaustively.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Gte,
    /// Greater than, but also matches when the left side is null
    WeakGt,
    Lt,
    Lte,
    /// Set membership: left IN values
    OneOf,
    /// Set exclusion: left NOT IN values
    NotIn,
    Between,
    Like,
    NotLike,
    Includes,
    /// Operator name this crate does not know about (preserved verbatim)
    Other(String),
}

impl Operator {
    /// Returns the operator name as it appears in a serialized description
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::NotEq => "notEq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::WeakGt => "weakGt",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::OneOf => "oneOf",
            Operator::NotIn => "notIn",
            Operator::Between => "between",
            Operator::Like => "like",
            Operator::NotLike => "notLike",
            Operator::Includes => "includes",
            Operator::Other(name) => name.as_str(),
        }
    }

    /// Returns true if this is an equality operator
    pub fn is_equality(&self) -> bool {
        matches!(self, Operator::Eq)
    }

    /// Returns true for operators whose operand is a list of candidate values
    pub fn is_set_membership(&self) -> bool {
        matches!(self, Operator::OneOf | Operator::NotIn)
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        match name.as_str() {
            "eq" => Operator::Eq,
            "notEq" => Operator::NotEq,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "weakGt" => Operator::WeakGt,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "oneOf" => Operator::OneOf,
            "notIn" => Operator::NotIn,
            "between" => Operator::Between,
            "like" => Operator::Like,
            "notLike" => Operator::NotLike,
            "includes" => Operator::Includes,
            _ => Operator::Other(name),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonRight {
    /// A single literal value
    Value(Value),
    /// A list of literal values (oneOf, notIn, between)
    Values(Vec<Value>),
    /// Another column of the same record
    Column(String),
}

impl ComparisonRight {
    /// Number of operands carried by this side
    pub fn operand_count(&self) -> usize {
        match self {
            ComparisonRight::Values(values) => values.len(),
            ComparisonRight::Value(_) | ComparisonRight::Column(_) => 1,
        }
    }
}

/// Operator plus operand(s)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub operator: Operator,
    pub right: ComparisonRight,
}

impl Comparison {
    fn value(operator: Operator, value: Value) -> Self {
        Self {
            operator,
            right: ComparisonRight::Value(value),
        }
    }

    fn values(operator: Operator, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            operator,
            right: ComparisonRight::Values(values.into_iter().collect()),
        }
    }

    pub fn eq(value: Value) -> Self {
        Self::value(Operator::Eq, value)
    }

    pub fn not_eq(value: Value) -> Self {
        Self::value(Operator::NotEq, value)
    }

    pub fn gt(value: Value) -> Self {
        Self::value(Operator::Gt, value)
    }

    pub fn gte(value: Value) -> Self {
        Self::value(Operator::Gte, value)
    }

    pub fn weak_gt(value: Value) -> Self {
        Self::value(Operator::WeakGt, value)
    }

    pub fn lt(value: Value) -> Self {
        Self::value(Operator::Lt, value)
    }

    pub fn lte(value: Value) -> Self {
        Self::value(Operator::Lte, value)
    }

    pub fn one_of(values: impl IntoIterator<Item = Value>) -> Self {
        Self::values(Operator::OneOf, values)
    }

    pub fn not_in(values: impl IntoIterator<Item = Value>) -> Self {
        Self::values(Operator::NotIn, values)
    }

    pub fn between(low: Value, high: Value) -> Self {
        Self::values(Operator::Between, [low, high])
    }

    pub fn like(pattern: impl Into<String>) -> Self {
        Self::value(Operator::Like, Value::String(pattern.into()))
    }

    pub fn not_like(pattern: impl Into<String>) -> Self {
        Self::value(Operator::NotLike, Value::String(pattern.into()))
    }

    pub fn includes(needle: impl Into<String>) -> Self {
        Self::value(Operator::Includes, Value::String(needle.into()))
    }

    /// Equality against another column of the same record
    pub fn column_eq(column: impl Into<String>) -> Self {
        Self {
            operator: Operator::Eq,
            right: ComparisonRight::Column(column.into()),
        }
    }
}

/// `where(column, comparison)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnComparison {
    /// Column on the queried table
    pub left: String,
    pub comparison: Comparison,
}

/// `on(table, conditions)`: records must have a matching row in `table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedCondition {
    /// Related table name
    pub table: String,
    /// Conditions evaluated against the related table
    pub conditions: Vec<Condition>,
}

/// One unit of filtering criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Condition {
    Where(ColumnComparison),
    On(RelatedCondition),
    And { conditions: Vec<Condition> },
    Or { conditions: Vec<Condition> },
    /// Raw SQL fragment, never inspected
    Sql { expr: String },
    /// Raw in-memory store query object, never inspected
    Loki { expr: Value },
}

/// Classification of a condition for cost estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionShape {
    ColumnComparison,
    RelatedTable,
    Combinator,
    Opaque,
}

impl ConditionShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionShape::ColumnComparison => "COLUMN",
            ConditionShape::RelatedTable => "ON",
            ConditionShape::Combinator => "COMBINATOR",
            ConditionShape::Opaque => "OPAQUE",
        }
    }
}

impl Condition {
    /// `where(column, comparison)`
    pub fn where_cmp(column: impl Into<String>, comparison: Comparison) -> Self {
        Condition::Where(ColumnComparison {
            left: column.into(),
            comparison,
        })
    }

    /// `where(column, value)`, shorthand for an equality comparison
    pub fn where_eq(column: impl Into<String>, value: Value) -> Self {
        Self::where_cmp(column, Comparison::eq(value))
    }

    /// `on(table, conditions)`
    pub fn on(table: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Condition::On(RelatedCondition {
            table: table.into(),
            conditions,
        })
    }

    /// `on(table, column, value)`, shorthand for a single related equality
    pub fn on_eq(table: impl Into<String>, column: impl Into<String>, value: Value) -> Self {
        Self::on(table, vec![Self::where_eq(column, value)])
    }

    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And { conditions }
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or { conditions }
    }

    pub fn unsafe_sql(expr: impl Into<String>) -> Self {
        Condition::Sql { expr: expr.into() }
    }

    pub fn unsafe_loki(expr: Value) -> Self {
        Condition::Loki { expr }
    }

    /// Classifies this condition
    pub fn shape(&self) -> ConditionShape {
        match self {
            Condition::Where(_) => ConditionShape::ColumnComparison,
            Condition::On(_) => ConditionShape::RelatedTable,
            Condition::And { .. } | Condition::Or { .. } => ConditionShape::Combinator,
            Condition::Sql { .. } | Condition::Loki { .. } => ConditionShape::Opaque,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortBy {
    pub sort_column: String,
    pub sort_order: SortOrder,
}

impl SortBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            sort_column: column.into(),
            sort_order: SortOrder::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            sort_column: column.into(),
            sort_order: SortOrder::Desc,
        }
    }
}

/// Complete description of a query against one table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescription {
    /// Top-level conditions, all combined with AND
    #[serde(rename = "where", default)]
    pub conditions: Vec<Condition>,
    /// Related tables referenced by top-level `on` conditions
    #[serde(default)]
    pub join_tables: Vec<String>,
    #[serde(default)]
    pub sort_by: Vec<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
}

impl QueryDescription {
    /// Creates a description with the given conditions and nothing else
    pub fn with_conditions(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            ..Self::default()
        }
    }
}
