//! Optimizer error types
//!
//! Error codes:
//! - AERO_OPTIMIZE_UNKNOWN_TABLE (REJECT)
//! - AERO_OPTIMIZE_INVALID_CONFIG (REJECT)
//! - AERO_OPTIMIZE_CONFIG_IO (REJECT)
//! - AERO_OPTIMIZE_CONFIG_PARSE (REJECT)

use std::fmt;
use std::io;

use thiserror::Error;

/// Severity levels for optimizer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Optimizer-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerErrorCode {
    /// Target table is not defined in the schema
    AeroOptimizeUnknownTable,
    /// Score weights are out of range
    AeroOptimizeInvalidConfig,
    /// Config file could not be read
    AeroOptimizeConfigIo,
    /// Config document is not valid JSON for `OptimizerConfig`
    AeroOptimizeConfigParse,
}

impl OptimizerErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            OptimizerErrorCode::AeroOptimizeUnknownTable => "AERO_OPTIMIZE_UNKNOWN_TABLE",
            OptimizerErrorCode::AeroOptimizeInvalidConfig => "AERO_OPTIMIZE_INVALID_CONFIG",
            OptimizerErrorCode::AeroOptimizeConfigIo => "AERO_OPTIMIZE_CONFIG_IO",
            OptimizerErrorCode::AeroOptimizeConfigParse => "AERO_OPTIMIZE_CONFIG_PARSE",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for OptimizerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Optimizer error type
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("[REJECT] AERO_OPTIMIZE_UNKNOWN_TABLE: table '{0}' is not defined in the schema")]
    UnknownTable(String),

    #[error("[REJECT] AERO_OPTIMIZE_INVALID_CONFIG: {0}")]
    InvalidConfig(String),

    #[error("[REJECT] AERO_OPTIMIZE_CONFIG_IO: {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("[REJECT] AERO_OPTIMIZE_CONFIG_PARSE: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl OptimizerError {
    /// Create an unknown table error
    pub fn unknown_table(table: impl Into<String>) -> Self {
        OptimizerError::UnknownTable(table.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        OptimizerError::InvalidConfig(reason.into())
    }

    /// Returns the error code
    pub fn code(&self) -> OptimizerErrorCode {
        match self {
            OptimizerError::UnknownTable(_) => OptimizerErrorCode::AeroOptimizeUnknownTable,
            OptimizerError::InvalidConfig(_) => OptimizerErrorCode::AeroOptimizeInvalidConfig,
            OptimizerError::ConfigIo { .. } => OptimizerErrorCode::AeroOptimizeConfigIo,
            OptimizerError::ConfigParse(_) => OptimizerErrorCode::AeroOptimizeConfigParse,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }
}

/// Result type for optimizer operations
pub type OptimizerResult<T> = Result<T, OptimizerError>;
