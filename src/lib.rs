//! Request Profiler
//!
//! In-process instrumentation for one unit of work (a request, a script
//! run). Application code records console messages, memory readings,
//! errors, speed marks, benchmarks and SQL query executions on a
//! `Recorder`; at the end an `Aggregator` turns the snapshot into a
//! `Report` with humanized totals, query breakdowns and duplicate counts.
//!
//! ## Getting Started
//!
//! ```no_run
//! use request_profiler::aggregator::{Aggregator, SummaryInputs};
//! use request_profiler::recorder::Recorder;
//!
//! let mut recorder = Recorder::new();
//! recorder.log("handling request");
//! recorder.log_benchmark("render");
//! recorder.log_benchmark("render");
//!
//! let snapshot = recorder.snapshot();
//! let report = Aggregator::new().summarize(&snapshot, &SummaryInputs::from_snapshot(&snapshot));
//! println!("{}", report.speed_totals.total);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod probe;
pub mod recorder;
pub mod report;
pub mod utils;
