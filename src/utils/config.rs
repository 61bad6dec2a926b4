//! Configuration and constants for the recorder and report.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Prefix for the key of an open benchmark.
/// The space after the underscore is part of the key format.
pub const BENCHMARK_KEY_PREFIX: &str = "benchmark_ ";

/// Prefix prepended to SQL before it is handed to the explain callback
pub const EXPLAIN_PREFIX: &str = "EXPLAIN ";

/// Statement keywords that get their own bucket in the query totals
pub const QUERY_TYPES: &[&str] = &["select", "insert", "update", "delete"];

// Byte units, smallest first. Sizes stop growing at the last unit.
pub const BYTE_UNITS: &[&str] = &["bytes", "kB", "MB", "GB", "TB"];

/// Shown in place of a limit that is not configured
pub const UNLIMITED: &str = "unlimited";

// Default labels for recording calls that take an optional label
pub const DEFAULT_MEMORY_LABEL: &str = "Memory usage at this point";
pub const DEFAULT_VALUE_MEMORY_LABEL: &str = "Variable memory usage at this point";
pub const DEFAULT_PEAK_MEMORY_LABEL: &str = "Peak memory usage at this point";
pub const DEFAULT_SPEED_LABEL: &str = "Point in Time";
