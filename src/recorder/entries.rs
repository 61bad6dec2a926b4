//! Entry types held in the category buffers.
//!
//! Each category stores its own entry type. Benchmarks and queries carry
//! a `Timing` that is either still open or closed with an end time, so an
//! entry can only contribute a duration once it has been closed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::panic::Location;

/// Structured data attached to a query by an explain call
pub type ExplainResult = Value;

/// Structured data returned by a query profiler
pub type ProfileResult = Value;

/// The six fixed event buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Console,
    Memory,
    Errors,
    Speed,
    Benchmarks,
    Queries,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Console,
        Category::Memory,
        Category::Errors,
        Category::Speed,
        Category::Benchmarks,
        Category::Queries,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Console => "console",
            Category::Memory => "memory",
            Category::Errors => "errors",
            Category::Speed => "speed",
            Category::Benchmarks => "benchmarks",
            Category::Queries => "queries",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a paired record is still waiting for its closing call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Timing {
    Open,
    Closed { end_seconds: f64 },
}

impl Timing {
    pub fn is_open(&self) -> bool {
        matches!(self, Timing::Open)
    }

    pub fn end_seconds(&self) -> Option<f64> {
        match self {
            Timing::Open => None,
            Timing::Closed { end_seconds } => Some(*end_seconds),
        }
    }
}

/// Ordered entries of one category plus its completed-event count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLog<T> {
    pub entries: Vec<T>,
    pub count: u64,
}

impl<T> Default for CategoryLog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            count: 0,
        }
    }
}

impl<T> CategoryLog<T> {
    /// Append a completed entry
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
        self.count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Free-form logged value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub data: Value,
}

/// Process memory reading, or the serialized size of a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySample {
    pub bytes: u64,
    pub label: String,
    /// Type name of the measured value; `None` for process readings
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    pub file: String,
    pub line: u32,
}

/// A single point in time in the speed log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMark {
    pub timestamp_seconds: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub label: String,
    pub start_seconds: f64,
    pub timing: Timing,
}

impl BenchmarkRecord {
    /// Elapsed seconds, once closed
    pub fn duration(&self) -> Option<f64> {
        self.timing.end_seconds().map(|end| end - self.start_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub sql: String,
    pub start_seconds: f64,
    pub timing: Timing,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub explain: Option<ExplainResult>,
}

impl QueryRecord {
    /// Elapsed seconds, once closed
    pub fn duration(&self) -> Option<f64> {
        self.timing.end_seconds().map(|end| end - self.start_seconds)
    }
}

/// Where an error came from, as recorded in the errors category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSite {
    pub message: String,
    pub file: String,
    pub line: u32,
}

impl ErrorSite {
    pub fn new(message: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            file: file.into(),
            line,
        }
    }

    /// Take the error's message and the location of the calling code
    #[track_caller]
    pub fn capture<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let location = Location::caller();
        Self::new(err.to_string(), location.file(), location.line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_record_has_no_duration() {
        let record = BenchmarkRecord {
            label: "bench".to_string(),
            start_seconds: 1.0,
            timing: Timing::Open,
        };
        assert!(record.duration().is_none());
    }

    #[test]
    fn test_closed_record_duration() {
        let record = QueryRecord {
            sql: "SELECT 1".to_string(),
            start_seconds: 1.0,
            timing: Timing::Closed { end_seconds: 1.25 },
            explain: None,
        };
        assert_eq!(record.duration(), Some(0.25));
    }

    #[test]
    fn test_category_log_push_counts() {
        let mut log = CategoryLog::default();
        log.push(Message { data: Value::from("hello") });
        log.push(Message { data: Value::from(42) });
        assert_eq!(log.count, 2);
        assert_eq!(log.entries.len(), 2);
    }

    #[test]
    fn test_error_site_capture() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let site = ErrorSite::capture(&err);
        assert_eq!(site.message, "disk on fire");
        assert!(site.file.ends_with("entries.rs"));
        assert!(site.line > 0);
    }

    #[test]
    fn test_timing_serialization() {
        let json = serde_json::to_value(Timing::Closed { end_seconds: 2.5 }).unwrap();
        assert_eq!(json["state"], "closed");
        assert_eq!(json["end_seconds"], 2.5);
    }
}
