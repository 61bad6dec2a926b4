//! JSON output for reports and snapshots.
//!
//! Writes pretty-printed JSON, creating parent directories as needed.

use crate::recorder::Snapshot;
use crate::report::Report;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    info!("Writing report to: {}", output_path.as_ref().display());
    write_json(report, output_path.as_ref())
}

/// Read a report from a JSON file
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Report, OutputError> {
    let report: Report = read_json(input_path.as_ref())?;

    debug!(
        "Report loaded: version {}, {} queries",
        report.version,
        report.queries.len()
    );

    Ok(report)
}

/// Save a recorder snapshot so it can be summarized later
pub fn write_snapshot(snapshot: &Snapshot, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    info!("Writing snapshot to: {}", output_path.as_ref().display());
    write_json(snapshot, output_path.as_ref())
}

/// Read a recorder snapshot from a JSON file
pub fn read_snapshot(input_path: impl AsRef<Path>) -> Result<Snapshot, OutputError> {
    let snapshot: Snapshot = read_json(input_path.as_ref())?;

    debug!(
        "Snapshot loaded: {} console entries, {} query statements",
        snapshot.console.entries.len(),
        snapshot.queries.entries.len()
    );

    Ok(snapshot)
}

/// Serialize a value to a JSON file
///
/// **Private** - shared by report and snapshot writers
fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Wrote {} bytes to {}",
        calculate_file_size(output_path),
        output_path.display()
    );

    Ok(())
}

fn read_json<T: DeserializeOwned>(input_path: &Path) -> Result<T, OutputError> {
    debug!("Reading JSON from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let value = serde_json::from_reader(BufReader::new(file))
        .map_err(OutputError::SerializationFailed)?;

    Ok(value)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
