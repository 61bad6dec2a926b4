//! The recorder: one instance per unit of work.
//!
//! Instrumented code calls one method per event kind. Every call is
//! best-effort: nothing here returns an error or panics on caller input.
//! A disabled recorder drops every call.

use super::benchmarks::{BenchmarkLog, KeyedBenchmark};
use super::entries::{
    CategoryLog, ErrorRecord, ErrorSite, ExplainResult, MemorySample, Message, TimeMark,
};
use super::queries::{QueryLog, QuerySequence};
use crate::probe::{Probes, SystemProbes};
use crate::utils::config::{
    DEFAULT_MEMORY_LABEL, DEFAULT_PEAK_MEMORY_LABEL, DEFAULT_SPEED_LABEL,
    DEFAULT_VALUE_MEMORY_LABEL,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything recorded so far, as handed to the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Start of the unit of work, in seconds
    pub started_at: f64,

    /// Time the snapshot was taken, in seconds
    pub taken_at: f64,

    pub console: CategoryLog<Message>,
    pub memory: CategoryLog<MemorySample>,
    pub errors: CategoryLog<ErrorRecord>,
    pub speed: CategoryLog<TimeMark>,
    pub benchmarks: CategoryLog<KeyedBenchmark>,
    pub queries: CategoryLog<QuerySequence>,
}

impl Snapshot {
    /// Seconds between the start of the unit of work and the snapshot
    pub fn elapsed_seconds(&self) -> f64 {
        (self.taken_at - self.started_at).max(0.0)
    }
}

pub struct Recorder {
    probes: Box<dyn Probes>,
    enabled: bool,
    started_at: f64,
    console: CategoryLog<Message>,
    memory: CategoryLog<MemorySample>,
    errors: CategoryLog<ErrorRecord>,
    speed: CategoryLog<TimeMark>,
    benchmarks: BenchmarkLog,
    queries: QueryLog,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    /// Create a recorder reading the real clock and process memory
    pub fn new() -> Self {
        Self::with_probes(SystemProbes::new())
    }

    /// Create a recorder reading from the given probes
    ///
    /// The unit of work starts now, according to those probes.
    pub fn with_probes(probes: impl Probes + 'static) -> Self {
        let started_at = probes.now_seconds();
        Self {
            probes: Box::new(probes),
            enabled: true,
            started_at,
            console: CategoryLog::default(),
            memory: CategoryLog::default(),
            errors: CategoryLog::default(),
            speed: CategoryLog::default(),
            benchmarks: BenchmarkLog::default(),
            queries: QueryLog::default(),
        }
    }

    /// Override the start of the unit of work (e.g. the request arrival time)
    pub fn with_start_time(mut self, started_at: f64) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drop everything recorded and start a new unit of work
    pub fn reset(&mut self) {
        self.started_at = self.probes.now_seconds();
        self.console = CategoryLog::default();
        self.memory = CategoryLog::default();
        self.errors = CategoryLog::default();
        self.speed = CategoryLog::default();
        self.benchmarks = BenchmarkLog::default();
        self.queries = QueryLog::default();
        debug!("Recorder reset");
    }

    /// Log a value to the console
    pub fn log<T: Serialize + ?Sized>(&mut self, value: &T) {
        if !self.enabled {
            return;
        }

        let data = serde_json::to_value(value).unwrap_or_else(|e| {
            warn!("Logged value could not be serialized: {}", e);
            Value::String(format!("<unserializable: {}>", e))
        });

        self.console.push(Message { data });
    }

    /// Log the current process memory usage
    pub fn log_memory(&mut self, label: Option<&str>) {
        if !self.enabled {
            return;
        }

        let bytes = self.probes.current_memory();
        self.memory.push(MemorySample {
            bytes,
            label: label.unwrap_or(DEFAULT_MEMORY_LABEL).to_string(),
            value_type: None,
        });
    }

    /// Log the serialized size of a value, with its type name
    pub fn log_value_memory<T: Serialize + ?Sized>(&mut self, label: Option<&str>, value: &T) {
        if !self.enabled {
            return;
        }

        let bytes = match serde_json::to_vec(value) {
            Ok(encoded) => encoded.len() as u64,
            Err(e) => {
                warn!("Cannot measure value size: {}", e);
                0
            }
        };

        self.memory.push(MemorySample {
            bytes,
            label: label.unwrap_or(DEFAULT_VALUE_MEMORY_LABEL).to_string(),
            value_type: Some(std::any::type_name::<T>().to_string()),
        });
    }

    /// Log the peak process memory usage
    pub fn log_peak_memory(&mut self, label: Option<&str>) {
        if !self.enabled {
            return;
        }

        let bytes = self.probes.peak_memory();
        self.memory.push(MemorySample {
            bytes,
            label: label.unwrap_or(DEFAULT_PEAK_MEMORY_LABEL).to_string(),
            value_type: None,
        });
    }

    /// Log an error raised at the calling location
    ///
    /// A non-empty `message` replaces the error's own message.
    #[track_caller]
    pub fn log_error<E: std::error::Error + ?Sized>(&mut self, err: &E, message: Option<&str>) {
        let site = ErrorSite::capture(err);
        self.log_error_at(site, message);
    }

    /// Log an error whose origin is already known
    pub fn log_error_at(&mut self, site: ErrorSite, message: Option<&str>) {
        if !self.enabled {
            return;
        }

        let message = match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => site.message,
        };

        self.errors.push(ErrorRecord {
            message,
            file: site.file,
            line: site.line,
        });
    }

    /// Log a point in time
    pub fn log_speed(&mut self, label: Option<&str>) {
        if !self.enabled {
            return;
        }

        let timestamp_seconds = self.probes.now_seconds();
        self.speed.push(TimeMark {
            timestamp_seconds,
            label: label.unwrap_or(DEFAULT_SPEED_LABEL).to_string(),
        });
    }

    /// Start or finish timing a query
    ///
    /// Call once before running `sql` and once after, with identical text.
    /// The explain data passed to the closing call is attached to the record.
    pub fn log_query(&mut self, sql: &str, explain: Option<ExplainResult>) {
        if !self.enabled {
            return;
        }

        let now = self.probes.now_seconds();
        self.queries.record(sql, explain, now);
    }

    /// Start or finish a named benchmark
    pub fn log_benchmark(&mut self, label: &str) {
        if !self.enabled {
            return;
        }

        let now = self.probes.now_seconds();
        self.benchmarks.toggle(label, now);
    }

    /// Copy of everything recorded so far
    pub fn snapshot(&self) -> Snapshot {
        let snapshot = Snapshot {
            started_at: self.started_at,
            taken_at: self.probes.now_seconds(),
            console: self.console.clone(),
            memory: self.memory.clone(),
            errors: self.errors.clone(),
            speed: self.speed.clone(),
            benchmarks: self.benchmarks.to_log(),
            queries: self.queries.to_log(),
        };

        debug!(
            "Snapshot: {} logs, {} memory, {} errors, {} speed, {} benchmarks, {} queries",
            snapshot.console.count,
            snapshot.memory.count,
            snapshot.errors.count,
            snapshot.speed.count,
            snapshot.benchmarks.count,
            snapshot.queries.count
        );

        snapshot
    }
}
