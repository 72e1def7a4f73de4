//! Schema error types
//!
//! Error codes:
//! - AERO_SCHEMA_MALFORMED (REJECT)
//! - AERO_SCHEMA_DUPLICATE_TABLE (REJECT)
//! - AERO_SCHEMA_DUPLICATE_COLUMN (REJECT)
//! - AERO_SCHEMA_RESERVED_COLUMN (REJECT)
//! - AERO_SCHEMA_IO (REJECT)

use std::fmt;
use std::io;

use thiserror::Error;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller-supplied schema rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema structure or JSON is invalid
    AeroSchemaMalformed,
    /// Two tables share a name
    AeroSchemaDuplicateTable,
    /// Two columns of one table share a name
    AeroSchemaDuplicateColumn,
    /// Column uses a name reserved for record bookkeeping
    AeroSchemaReservedColumn,
    /// Schema file could not be read or written
    AeroSchemaIo,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::AeroSchemaMalformed => "AERO_SCHEMA_MALFORMED",
            SchemaErrorCode::AeroSchemaDuplicateTable => "AERO_SCHEMA_DUPLICATE_TABLE",
            SchemaErrorCode::AeroSchemaDuplicateColumn => "AERO_SCHEMA_DUPLICATE_COLUMN",
            SchemaErrorCode::AeroSchemaReservedColumn => "AERO_SCHEMA_RESERVED_COLUMN",
            SchemaErrorCode::AeroSchemaIo => "AERO_SCHEMA_IO",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("[REJECT] AERO_SCHEMA_MALFORMED: {0}")]
    Malformed(String),

    #[error("[REJECT] AERO_SCHEMA_DUPLICATE_TABLE: table '{0}' is defined more than once")]
    DuplicateTable(String),

    #[error("[REJECT] AERO_SCHEMA_DUPLICATE_COLUMN: column '{table}.{column}' is defined more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("[REJECT] AERO_SCHEMA_RESERVED_COLUMN: column '{table}.{column}' uses a reserved name")]
    ReservedColumn { table: String, column: String },

    #[error("[REJECT] AERO_SCHEMA_IO: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl SchemaError {
    /// Create a malformed schema error
    pub fn malformed(reason: impl Into<String>) -> Self {
        SchemaError::Malformed(reason.into())
    }

    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        SchemaError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            SchemaError::Malformed(_) => SchemaErrorCode::AeroSchemaMalformed,
            SchemaError::DuplicateTable(_) => SchemaErrorCode::AeroSchemaDuplicateTable,
            SchemaError::DuplicateColumn { .. } => SchemaErrorCode::AeroSchemaDuplicateColumn,
            SchemaError::ReservedColumn { .. } => SchemaErrorCode::AeroSchemaReservedColumn,
            SchemaError::Io { .. } => SchemaErrorCode::AeroSchemaIo,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaErrorCode::AeroSchemaMalformed.code(),
            "AERO_SCHEMA_MALFORMED"
        );
        assert_eq!(
            SchemaErrorCode::AeroSchemaDuplicateTable.code(),
            "AERO_SCHEMA_DUPLICATE_TABLE"
        );
        assert_eq!(
            SchemaErrorCode::AeroSchemaReservedColumn.code(),
            "AERO_SCHEMA_RESERVED_COLUMN"
        );
    }

    #[test]
    fn test_display_includes_code_and_subject() {
        let err = SchemaError::DuplicateColumn {
            table: "tasks".into(),
            column: "name".into(),
        };
        let display = err.to_string();
        assert!(display.contains("AERO_SCHEMA_DUPLICATE_COLUMN"));
        assert!(display.contains("tasks.name"));
        assert_eq!(err.code(), SchemaErrorCode::AeroSchemaDuplicateColumn);
        assert_eq!(err.severity(), Severity::Reject);
    }
}
