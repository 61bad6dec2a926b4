//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Recording and aggregation never return these to the instrumented program:
//! callback failures are folded into the report instead.

use thiserror::Error;

/// Outcome of a failed explain or profiler callback
#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("callback failed: {0:#}")]
    Failed(anyhow::Error),

    #[error("callback panicked: {0}")]
    Panicked(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
