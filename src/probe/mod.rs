//! Host environment probes.
//!
//! The recorder and the aggregator never read the clock, the process
//! memory counters or the filesystem directly. They go through these probes:
//! - `SystemProbes` reads the real host
//! - `ManualProbes` is driven by hand (tests, demo runs)
//! - `collect_file_info` sizes the resources listed under file totals

pub mod files;
pub mod manual;
pub mod system;

pub use files::{collect_file_info, FileInfo};
pub use manual::ManualProbes;
pub use system::SystemProbes;

/// Source of time and memory readings for one unit of work
pub trait Probes {
    /// Current wall-clock time in fractional seconds
    fn now_seconds(&self) -> f64;

    /// Memory currently used by the process, in bytes
    fn current_memory(&self) -> u64;

    /// Highest memory usage seen so far by the process, in bytes
    fn peak_memory(&self) -> u64;
}
