//! Summarize command implementation.
//!
//! The summarize command:
//! 1. Reads a saved recorder snapshot
//! 2. Collects file sizes for the listed resources
//! 3. Aggregates the snapshot into a report
//! 4. Writes the report and optionally prints a summary

use crate::aggregator::{Aggregator, SummaryInputs};
use crate::output::{read_snapshot, render_text_summary, write_report};
use crate::probe::collect_file_info;
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the summarize command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SummarizeArgs {
    /// Snapshot JSON written by a recorder
    pub snapshot: PathBuf,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Peak memory in bytes (defaults to the largest recorded sample)
    pub peak_memory: Option<u64>,

    /// Configured memory limit in bytes
    pub memory_limit: Option<u64>,

    /// Configured maximum execution time in seconds
    pub max_execution_time: Option<f64>,

    /// Elapsed seconds (defaults to the snapshot span)
    pub elapsed: Option<f64>,

    /// Files to list under file totals
    pub files: Vec<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for SummarizeArgs {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("snapshot.json"),
            output_json: PathBuf::from("report.json"),
            peak_memory: None,
            memory_limit: None,
            max_execution_time: None,
            elapsed: None,
            files: Vec::new(),
            print_summary: false,
        }
    }
}

/// Check arguments before doing any work
pub fn validate_args(args: &SummarizeArgs) -> Result<()> {
    if !args.snapshot.exists() {
        bail!("Snapshot file not found: {}", args.snapshot.display());
    }

    if let Some(seconds) = args.max_execution_time {
        if !seconds.is_finite() || seconds < 0.0 {
            bail!("Max execution time must be a non-negative number of seconds");
        }
    }

    if let Some(seconds) = args.elapsed {
        if !seconds.is_finite() || seconds < 0.0 {
            bail!("Elapsed time must be a non-negative number of seconds");
        }
    }

    Ok(())
}

/// Execute the summarize command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Snapshot read or parse failures
/// * Report write failures
pub fn execute_summarize(args: SummarizeArgs) -> Result<()> {
    info!("Summarizing snapshot: {}", args.snapshot.display());

    let snapshot = read_snapshot(&args.snapshot).context("Failed to read snapshot")?;

    let mut inputs = SummaryInputs::from_snapshot(&snapshot).with_files(collect_file_info(&args.files));
    if let Some(bytes) = args.peak_memory {
        inputs = inputs.with_peak_memory(bytes);
    }
    if let Some(bytes) = args.memory_limit {
        inputs = inputs.with_memory_limit(bytes);
    }
    if let Some(seconds) = args.max_execution_time {
        inputs = inputs.with_max_execution_time(seconds);
    }
    if let Some(seconds) = args.elapsed {
        inputs = inputs.with_elapsed(seconds);
    }

    debug!("Summary inputs: {:?}", inputs);

    let report = Aggregator::new().summarize(&snapshot, &inputs);

    write_report(&report, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if args.print_summary {
        println!("{}", render_text_summary(&report));
    }

    Ok(())
}
