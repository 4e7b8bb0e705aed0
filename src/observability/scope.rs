//! Stage-scoped begin/complete logging
//!
//! - `{name}_BEGIN` on creation (INFO)
//! - `{name}_COMPLETE` on `complete` (INFO), with `elapsed_ms`
//! - `{name}_FAILED` on `fail` (ERROR)
//! - `{name}_INCOMPLETE` if dropped without either (WARN)

use std::time::Instant;

use super::logger::Logger;

/// A scope around one stage of a command
///
/// ```ignore
/// let scope = ObservationScope::with_fields("EVALUATE", &[("query", path)]);
/// // ... do work ...
/// scope.complete_with_fields(&[("tuples", "3")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: bool,
    timer: Timer,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// `fields` are repeated on the completion line
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);
        Self {
            name,
            completed: false,
            timer: Timer::new(),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        self.completed = true;
        let elapsed = self.timer.elapsed_ms();

        let mut all: Vec<(&str, &str)> = self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all.extend(extra.iter().copied());
        all.push(("elapsed_ms", elapsed.as_str()));

        Logger::info(&format!("{}_COMPLETE", self.name), &all);
    }

    pub fn fail(mut self, reason: &str) {
        self.completed = true;
        Logger::error(&format!("{}_FAILED", self.name), &[("reason", reason)]);
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// Elapsed wall-clock time for log fields
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_complete() {
        let scope = ObservationScope::with_fields("TEST", &[("key", "value")]);
        assert!(!scope.is_completed());
        scope.complete_with_fields(&[("tuples", "2")]);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("something went wrong");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ms: u64 = timer.elapsed_ms().parse().unwrap();
        assert!(ms >= 10);
    }
}
