//! Event recording for one unit of work.
//!
//! This module holds:
//! - Category buffers for console messages, memory, errors and speed marks
//! - Toggle pairing for benchmarks (by label) and queries (by SQL text)
//! - Snapshots handed to the aggregator

pub mod benchmarks;
pub mod console;
pub mod entries;
pub mod keys;
pub mod queries;

// Re-export main types
pub use benchmarks::{BenchmarkLog, BenchmarkTransition, KeyedBenchmark};
pub use console::{Recorder, Snapshot};
pub use entries::{
    BenchmarkRecord, Category, CategoryLog, ErrorRecord, ErrorSite, ExplainResult, MemorySample,
    Message, ProfileResult, QueryRecord, TimeMark, Timing,
};
pub use keys::query_key;
pub use queries::{QueryLog, QuerySequence, QueryTransition};
