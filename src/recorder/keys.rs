//! Key derivation for paired records.

use crate::utils::config::BENCHMARK_KEY_PREFIX;
use sha2::{Digest, Sha256};

/// Key grouping every execution of byte-identical SQL text
pub fn query_key(sql: &str) -> String {
    hex::encode(Sha256::digest(sql.as_bytes()))
}

/// Key of a benchmark while it is open
pub fn open_benchmark_key(label: &str) -> String {
    format!("{}{}", BENCHMARK_KEY_PREFIX, label)
}

/// Key a closed benchmark is moved to
///
/// Derived from the close time. The close sequence number keeps two
/// benchmarks closed in the same clock tick apart.
pub fn closed_benchmark_key(end_seconds: f64, sequence: u64) -> String {
    let seed = format!("{:.6}#{}", end_seconds, sequence);
    hex::encode(Sha256::digest(seed.as_bytes()))
}
