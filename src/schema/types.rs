//! Schema type definitions
//!
//! Column types:
//! - string
//! - number
//! - boolean
//!
//! Serialized in list form, names sorted so output is deterministic:
//! `{"version":1,"tables":[{"name":"tasks","columns":[{"name":"title","type":"string"}]}]}`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::{SchemaError, SchemaResult};

/// Column names reserved for record bookkeeping
pub const RESERVED_COLUMNS: [&str; 3] = ["id", "_status", "_changed"];

/// Supported column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Boolean,
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optional: bool,
    /// Whether the storage backend keeps a lookup structure for this column
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_indexed: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            is_optional: false,
            is_indexed: false,
        }
    }

    /// Create an unindexed string column
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::String)
    }

    /// Create an unindexed number column
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Number)
    }

    /// Create an unindexed boolean column
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Boolean)
    }

    /// Marks the column as indexed
    pub fn indexed(mut self) -> Self {
        self.is_indexed = true;
        self
    }

    /// Marks the column as optional
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

#[derive(Serialize, Deserialize)]
struct TableSchemaDef {
    name: String,
    columns: Vec<ColumnSchema>,
}

/// Table definition with columns looked up by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableSchemaDef", into = "TableSchemaDef")]
pub struct TableSchema {
    name: String,
    columns: HashMap<String, ColumnSchema>,
}

impl TableSchema {
    /// Creates a table, rejecting duplicate and reserved column names
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> SchemaResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::malformed("table name must not be empty"));
        }

        let mut by_name = HashMap::with_capacity(columns.len());
        for column in columns {
            if column.name.is_empty() {
                return Err(SchemaError::malformed(format!(
                    "table '{}' has a column with an empty name",
                    name
                )));
            }
            if RESERVED_COLUMNS.contains(&column.name.as_str()) {
                return Err(SchemaError::ReservedColumn {
                    table: name,
                    column: column.name,
                });
            }
            if by_name.contains_key(&column.name) {
                return Err(SchemaError::DuplicateColumn {
                    table: name,
                    column: column.name,
                });
            }
            by_name.insert(column.name.clone(), column);
        }

        Ok(Self {
            name,
            columns: by_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.get(name)
    }

    /// Returns true if the column exists and is indexed
    pub fn is_indexed(&self, name: &str) -> bool {
        self.column(name).is_some_and(|c| c.is_indexed)
    }
}

impl TryFrom<TableSchemaDef> for TableSchema {
    type Error = SchemaError;

    fn try_from(def: TableSchemaDef) -> SchemaResult<Self> {
        TableSchema::new(def.name, def.columns)
    }
}

impl From<TableSchema> for TableSchemaDef {
    fn from(table: TableSchema) -> Self {
        let mut columns: Vec<ColumnSchema> = table.columns.into_values().collect();
        columns.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            name: table.name,
            columns,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct AppSchemaDef {
    version: u32,
    tables: Vec<TableSchema>,
}

/// Complete application schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AppSchemaDef", into = "AppSchemaDef")]
pub struct AppSchema {
    version: u32,
    tables: HashMap<String, TableSchema>,
}

impl AppSchema {
    /// Creates a schema, rejecting duplicate table names and version 0
    pub fn new(version: u32, tables: Vec<TableSchema>) -> SchemaResult<Self> {
        if version == 0 {
            return Err(SchemaError::malformed("schema version must be positive"));
        }

        let mut by_name = HashMap::with_capacity(tables.len());
        for table in tables {
            if by_name.contains_key(table.name()) {
                return Err(SchemaError::DuplicateTable(table.name));
            }
            by_name.insert(table.name.clone(), table);
        }

        Ok(Self {
            version,
            tables: by_name,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Gets a table by name
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl TryFrom<AppSchemaDef> for AppSchema {
    type Error = SchemaError;

    fn try_from(def: AppSchemaDef) -> SchemaResult<Self> {
        AppSchema::new(def.version, def.tables)
    }
}

impl From<AppSchema> for AppSchemaDef {
    fn from(schema: AppSchema) -> Self {
        let mut tables: Vec<TableSchema> = schema.tables.into_values().collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            version: schema.version,
            tables,
        }
    }
}

/// Read-only schema lookup consumed by the optimizer
pub trait SchemaLookup {
    /// Check if a table is defined
    fn has_table(&self, table: &str) -> bool;
    /// Look up a column of a table; `None` for unknown tables or columns
    fn lookup_column(&self, table: &str, column: &str) -> Option<&ColumnSchema>;
}

impl SchemaLookup for AppSchema {
    fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    fn lookup_column(&self, table: &str, column: &str) -> Option<&ColumnSchema> {
        self.table(table)?.column(column)
    }
}
