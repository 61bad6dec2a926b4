//! Aggregation of recorded events into a report.
//!
//! This module transforms a recorder snapshot into:
//! - A unified console view with humanized values
//! - Query totals, duplicate detection and per-type breakdown
//! - Memory, speed and file totals from injected probe values

pub mod callbacks;
pub mod console;
pub mod humanize;
pub mod metrics;
pub mod summary;

// Re-export main types and functions
pub use callbacks::{empty_result, QueryCallback};
pub use console::merge_console;
pub use humanize::{humanize_bytes, humanize_duration, percentage};
pub use metrics::{calculate_query_totals, classify_query};
pub use summary::{Aggregator, SummaryInputs};
