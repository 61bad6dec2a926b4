//! Benchmark pairing.
//!
//! A label toggles between open and closed: the first call opens a timer
//! under `"benchmark_ " + label`, the next call closes it and moves it to
//! a key derived from the close time, freeing the label for reuse.

use super::entries::{BenchmarkRecord, CategoryLog, Timing};
use super::keys::{closed_benchmark_key, open_benchmark_key};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A benchmark together with the key it is stored under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedBenchmark {
    pub key: String,
    pub record: BenchmarkRecord,
}

/// What a `log_benchmark` call did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BenchmarkTransition {
    Opened,
    Closed { duration: f64 },
}

#[derive(Debug, Clone, Default)]
pub struct BenchmarkLog {
    open: BTreeMap<String, BenchmarkRecord>,
    closed: Vec<KeyedBenchmark>,
}

impl BenchmarkLog {
    /// Open or close the benchmark for `label` at time `now`
    pub fn toggle(&mut self, label: &str, now: f64) -> BenchmarkTransition {
        let open_key = open_benchmark_key(label);

        if let Some(mut record) = self.open.remove(&open_key) {
            record.timing = Timing::Closed { end_seconds: now };
            let duration = now - record.start_seconds;
            let key = closed_benchmark_key(now, self.closed.len() as u64);

            debug!("Closed benchmark '{}' after {:.6}s", label, duration);
            self.closed.push(KeyedBenchmark { key, record });
            return BenchmarkTransition::Closed { duration };
        }

        debug!("Opened benchmark '{}'", label);
        self.open.insert(
            open_key,
            BenchmarkRecord {
                label: label.to_string(),
                start_seconds: now,
                timing: Timing::Open,
            },
        );

        BenchmarkTransition::Opened
    }

    /// Completed benchmarks
    pub fn count(&self) -> u64 {
        self.closed.len() as u64
    }

    /// Closed benchmarks in close order, then the ones still open
    pub fn to_log(&self) -> CategoryLog<KeyedBenchmark> {
        let entries = self
            .closed
            .iter()
            .cloned()
            .chain(self.open.iter().map(|(key, record)| KeyedBenchmark {
                key: key.clone(),
                record: record.clone(),
            }))
            .collect();

        CategoryLog {
            entries,
            count: self.count(),
        }
    }
}
