//! Output writers for reports and snapshots.
//!
//! This module handles:
//! - JSON reports and snapshots (pretty printed)
//! - Text summaries for the terminal

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_report, read_snapshot, write_report, write_snapshot};
pub use text::render_text_summary;
