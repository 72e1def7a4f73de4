//! Observability subsystem for aeroquery
//!
//! Structured JSON logging of typed lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use aeroquery::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::OptimizeComplete, &[("table", "tasks")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
