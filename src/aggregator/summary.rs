//! Turn a recorder snapshot into a report.

use super::callbacks::{invoke_best_effort, QueryCallback};
use super::console::merge_console;
use super::humanize::{humanize_bytes, humanize_duration};
use super::metrics::calculate_query_totals;
use crate::probe::{FileInfo, Probes};
use crate::recorder::{QuerySequence, Snapshot};
use crate::report::{FileReport, FileTotals, MemoryTotals, QueryReport, Report, SpeedTotals};
use crate::utils::config::{EXPLAIN_PREFIX, SCHEMA_VERSION, UNLIMITED};
use chrono::Utc;
use log::{debug, info};
use serde_json::Value;

/// Values about the unit of work that the recorder does not collect itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryInputs {
    /// Peak process memory, in bytes
    pub peak_memory: u64,

    /// Configured memory limit, in bytes
    pub memory_limit: Option<u64>,

    /// Configured maximum execution time, in seconds
    pub max_execution_time: Option<f64>,

    /// Wall time since the unit of work started, in seconds
    pub elapsed_seconds: f64,

    /// Resources listed under file totals
    pub files: Vec<FileInfo>,
}

impl SummaryInputs {
    /// Read peak memory and elapsed time from probes
    pub fn from_probes(probes: &dyn Probes, started_at: f64) -> Self {
        Self {
            peak_memory: probes.peak_memory(),
            elapsed_seconds: (probes.now_seconds() - started_at).max(0.0),
            ..Self::default()
        }
    }

    /// Derive what we can from the snapshot alone
    ///
    /// Elapsed time is the snapshot span; peak memory is the largest
    /// process memory sample recorded.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let peak_memory = snapshot
            .memory
            .entries
            .iter()
            .filter(|sample| sample.value_type.is_none())
            .map(|sample| sample.bytes)
            .max()
            .unwrap_or(0);

        Self {
            peak_memory,
            elapsed_seconds: snapshot.elapsed_seconds(),
            ..Self::default()
        }
    }

    pub fn with_peak_memory(mut self, bytes: u64) -> Self {
        self.peak_memory = bytes;
        self
    }

    pub fn with_memory_limit(mut self, bytes: u64) -> Self {
        self.memory_limit = Some(bytes);
        self
    }

    pub fn with_max_execution_time(mut self, seconds: f64) -> Self {
        self.max_execution_time = Some(seconds);
        self
    }

    pub fn with_elapsed(mut self, seconds: f64) -> Self {
        self.elapsed_seconds = seconds;
        self
    }

    pub fn with_files(mut self, files: Vec<FileInfo>) -> Self {
        self.files = files;
        self
    }
}

/// Builds reports, optionally enriching queries through callbacks
#[derive(Default)]
pub struct Aggregator {
    explain_callback: Option<QueryCallback>,
    profiler_callback: Option<QueryCallback>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback receiving `"EXPLAIN " + sql` for every completed query
    pub fn with_explain_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<Value> + 'static,
    {
        self.explain_callback = Some(Box::new(callback));
        self
    }

    /// Callback receiving the SQL text of every completed query
    pub fn with_profiler_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<Value> + 'static,
    {
        self.profiler_callback = Some(Box::new(callback));
        self
    }

    /// Summarize one unit of work
    ///
    /// **Public** - main entry point for aggregation
    ///
    /// Never fails: callback failures degrade to empty results on the
    /// affected query.
    pub fn summarize(&self, snapshot: &Snapshot, inputs: &SummaryInputs) -> Report {
        info!("Summarizing unit of work ({:.3}s elapsed)", inputs.elapsed_seconds);

        let logs = merge_console(snapshot);
        let queries = self.flatten_queries(&snapshot.queries.entries);
        let query_totals = calculate_query_totals(&snapshot.queries.entries);
        let (files, file_totals) = summarize_files(&inputs.files);

        debug!(
            "Report: {} console entries, {} completed queries, {} files",
            logs.entries.len(),
            queries.len(),
            files.len()
        );

        Report {
            version: SCHEMA_VERSION.to_string(),
            logs,
            queries,
            query_totals,
            memory_totals: summarize_memory(inputs),
            speed_totals: summarize_speed(inputs),
            files,
            file_totals,
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// Completed queries in key order, then execution order
    ///
    /// **Private** - internal helper for summarize
    fn flatten_queries(&self, sequences: &[QuerySequence]) -> Vec<QueryReport> {
        let mut queries = Vec::new();

        for sequence in sequences {
            for (index, record) in sequence.closed() {
                let duration = record.duration().unwrap_or(0.0);

                let (explain, explain_error) = match &self.explain_callback {
                    Some(callback) => {
                        let sql = format!("{}{}", EXPLAIN_PREFIX, record.sql);
                        let (value, error) = invoke_best_effort("explain", callback, &sql);
                        (Some(value), error)
                    }
                    None => (record.explain.clone(), None),
                };

                let (profile, profile_error) = match &self.profiler_callback {
                    Some(callback) => {
                        let (value, error) = invoke_best_effort("profiler", callback, &record.sql);
                        (Some(value), error)
                    }
                    None => (None, None),
                };

                queries.push(QueryReport {
                    sql: record.sql.clone(),
                    time: humanize_duration(duration),
                    duration_seconds: duration,
                    duplicate: index > 0,
                    explain,
                    explain_error,
                    profile,
                    profile_error,
                });
            }
        }

        queries
    }
}

fn summarize_memory(inputs: &SummaryInputs) -> MemoryTotals {
    MemoryTotals {
        used: humanize_bytes(inputs.peak_memory),
        total: inputs
            .memory_limit
            .map(humanize_bytes)
            .unwrap_or_else(|| UNLIMITED.to_string()),
    }
}

fn summarize_speed(inputs: &SummaryInputs) -> SpeedTotals {
    SpeedTotals {
        total: humanize_duration(inputs.elapsed_seconds),
        allowed: inputs
            .max_execution_time
            .map(humanize_duration)
            .unwrap_or_else(|| UNLIMITED.to_string()),
    }
}

fn summarize_files(files: &[FileInfo]) -> (Vec<FileReport>, FileTotals) {
    let list = files
        .iter()
        .map(|file| FileReport {
            name: file.name.clone(),
            size: humanize_bytes(file.size),
        })
        .collect();

    let total = files.iter().fold(0u64, |acc, f| acc.saturating_add(f.size));
    let largest = files.iter().map(|f| f.size).max().unwrap_or(0);

    let totals = FileTotals {
        count: files.len() as u64,
        size: humanize_bytes(total),
        largest: humanize_bytes(largest),
    };

    (list, totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ManualProbes;
    use crate::recorder::Recorder;
    use serde_json::json;

    #[test]
    fn test_memory_and_speed_totals() {
        let inputs = SummaryInputs::default()
            .with_peak_memory(3 * 1024 * 1024)
            .with_memory_limit(128 * 1024 * 1024)
            .with_elapsed(0.25);

        assert_eq!(
            summarize_memory(&inputs),
            MemoryTotals {
                used: "3.00 MB".to_string(),
                total: "128.00 MB".to_string(),
            }
        );
        assert_eq!(
            summarize_speed(&inputs),
            SpeedTotals {
                total: "250.000 ms".to_string(),
                allowed: "unlimited".to_string(),
            }
        );
    }

    #[test]
    fn test_file_totals() {
        let files = vec![FileInfo::new("a.rs", 1024), FileInfo::new("b.rs", 512)];
        let (list, totals) = summarize_files(&files);

        assert_eq!(list[0].size, "1.00 kB");
        assert_eq!(list[1].size, "512 bytes");
        assert_eq!(totals.count, 2);
        assert_eq!(totals.size, "1.50 kB");
        assert_eq!(totals.largest, "1.00 kB");
    }

    #[test]
    fn test_file_totals_saturate() {
        let files = vec![FileInfo::new("a", u64::MAX), FileInfo::new("b", 1)];
        let (list, totals) = summarize_files(&files);

        assert_eq!(list.len(), 2);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.size, humanize_bytes(u64::MAX));
        assert_eq!(totals.largest, totals.size);
    }

    #[test]
    fn test_empty_file_list() {
        let (list, totals) = summarize_files(&[]);
        assert!(list.is_empty());
        assert_eq!(totals.count, 0);
        assert_eq!(totals.size, "0 bytes");
    }

    #[test]
    fn test_explain_callback_gets_prefixed_sql() {
        let probes = ManualProbes::new(0.0);
        let mut recorder = Recorder::with_probes(probes.clone());
        recorder.log_query("SELECT * FROM users", None);
        probes.advance(0.01);
        recorder.log_query("SELECT * FROM users", None);

        let aggregator = Aggregator::new()
            .with_explain_callback(|sql: &str| Ok(json!({ "explained": sql })));
        let report = aggregator.summarize(&recorder.snapshot(), &SummaryInputs::default());

        assert_eq!(
            report.queries[0].explain,
            Some(json!({ "explained": "EXPLAIN SELECT * FROM users" }))
        );
        assert!(report.queries[0].profile.is_none());
    }

    #[test]
    fn test_recorded_explain_kept_without_callback() {
        let probes = ManualProbes::new(0.0);
        let mut recorder = Recorder::with_probes(probes.clone());
        recorder.log_query("SELECT 1 FROM dual", None);
        recorder.log_query("SELECT 1 FROM dual", Some(json!({ "rows": 1 })));

        let report = Aggregator::new().summarize(&recorder.snapshot(), &SummaryInputs::default());

        assert_eq!(report.queries[0].explain, Some(json!({ "rows": 1 })));
    }

    #[test]
    fn test_from_probes() {
        let probes = ManualProbes::new(5.0);
        probes.set_memory(4096);
        probes.advance(1.5);

        let inputs = SummaryInputs::from_probes(&probes, 5.0);
        assert_eq!(inputs.peak_memory, 4096);
        assert_eq!(inputs.elapsed_seconds, 1.5);
    }
}
