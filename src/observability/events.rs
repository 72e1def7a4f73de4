//! Observability events for aeroquery
//!
//! Events are explicit and typed, each with a fixed severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Schema file loaded
    SchemaLoaded,
    /// Optimizer configuration loaded
    ConfigLoaded,
    /// Conditions reordered
    OptimizeComplete,
    /// Optimizer disabled, query passed through
    OptimizeSkipped,
    /// Target table missing from schema
    OptimizeRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::ConfigLoaded => "OPTIMIZER_CONFIG_LOADED",
            Event::OptimizeComplete => "OPTIMIZE_COMPLETE",
            Event::OptimizeSkipped => "OPTIMIZE_SKIPPED",
            Event::OptimizeRejected => "OPTIMIZE_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaLoaded | Event::ConfigLoaded => Severity::Info,
            Event::OptimizeComplete | Event::OptimizeSkipped => Severity::Trace,
            Event::OptimizeRejected => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
