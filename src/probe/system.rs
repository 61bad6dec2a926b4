//! Probes backed by the running process.

use super::Probes;
use log::debug;
use std::time::{SystemTime, UNIX_EPOCH};

/// Reads the system clock and the process status counters
///
/// Memory readings come from `/proc/self/status` (`VmRSS` and `VmHWM`).
/// Where that file does not exist the readings are 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbes;

impl SystemProbes {
    pub fn new() -> Self {
        Self
    }
}

impl Probes for SystemProbes {
    fn now_seconds(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn current_memory(&self) -> u64 {
        read_status_field("VmRSS:")
    }

    fn peak_memory(&self) -> u64 {
        read_status_field("VmHWM:")
    }
}

/// Read a `kB` field from `/proc/self/status` and convert it to bytes
///
/// **Private** - internal helper
fn read_status_field(field: &str) -> u64 {
    match std::fs::read_to_string("/proc/self/status") {
        Ok(status) => parse_status_field(&status, field),
        Err(e) => {
            debug!("Process status unavailable: {}", e);
            0
        }
    }
}

fn parse_status_field(status: &str, field: &str) -> u64 {
    status
        .lines()
        .find_map(|line| line.strip_prefix(field))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}
