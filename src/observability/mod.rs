//! Observability subsystem for minibase
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Stage scopes with elapsed time
//!
//! Observability is read-only: nothing here affects query results.
//!
//! # Usage
//!
//! ```ignore
//! use minibase::observability::{Event, Logger, ObservationScope};
//!
//! Logger::info("QUERY_PARSED", &[("atoms", "3")]);
//!
//! let scope = ObservationScope::new("EVALUATE");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

fn event_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_severity() {
        assert_eq!(event_severity(Event::QueryRejected), Severity::Fatal);
        assert_eq!(event_severity(Event::CatalogLoaded), Severity::Info);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::CatalogLoaded, &[("relations", "2")]);
    }
}
