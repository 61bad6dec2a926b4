//! Query statistics: totals, duplicates and per-type breakdown.
//!
//! Only closed executions count. An execution still open when the
//! snapshot was taken has no duration and is skipped everywhere.

use super::humanize::{humanize_duration, percentage};
use crate::recorder::QuerySequence;
use crate::report::{QueryTotals, QueryTypeStats, QueryTypeTotals};
use crate::utils::config::QUERY_TYPES;
use log::debug;
use std::collections::HashMap;

/// Statement keyword of a query, if it is one of the tracked types
///
/// The keyword is the text before the first space after trimming,
/// lowercased. SQL without a space has no keyword.
pub fn classify_query(sql: &str) -> Option<&'static str> {
    let trimmed = sql.trim();
    let keyword = trimmed[..trimmed.find(' ')?].to_lowercase();

    QUERY_TYPES.iter().copied().find(|t| *t == keyword)
}

/// Running count and time for one statement type
#[derive(Debug, Clone, Copy, Default)]
struct TypeAccumulator {
    total: u64,
    time: f64,
}

/// Calculate query totals over every sequence in a snapshot
///
/// **Public** - main entry point for query metrics
///
/// # Arguments
/// * `sequences` - Query sequences from the recorder snapshot
///
/// # Returns
/// Totals with humanized times and rounded percentages
pub fn calculate_query_totals(sequences: &[QuerySequence]) -> QueryTotals {
    let mut count = 0u64;
    let mut statements = 0u64;
    let mut duplicates = 0u64;
    let mut time = 0.0f64;
    let mut by_type: HashMap<&'static str, TypeAccumulator> = HashMap::new();

    for sequence in sequences {
        let mut completed = 0u64;

        for (_, record) in sequence.closed() {
            let duration = record.duration().unwrap_or(0.0);
            completed += 1;
            count += 1;
            time += duration;

            if let Some(kind) = classify_query(&record.sql) {
                let acc = by_type.entry(kind).or_default();
                acc.total += 1;
                acc.time += duration;
            }
        }

        if completed > 0 {
            statements += 1;
        }
        if completed > 1 {
            duplicates += 1;
        }
    }

    debug!(
        "Query totals: {} executions, {} statements, {} duplicated, {:.6}s",
        count, statements, duplicates, time
    );

    let stats = |kind: &str| {
        let acc = by_type.get(kind).copied().unwrap_or_default();
        create_type_stats(acc, count, time)
    };

    QueryTotals {
        count,
        statements,
        duplicates,
        time: humanize_duration(time),
        types: QueryTypeTotals {
            select: stats("select"),
            insert: stats("insert"),
            update: stats("update"),
            delete: stats("delete"),
        },
    }
}

/// Turn an accumulator into display stats
///
/// **Private** - internal conversion
fn create_type_stats(acc: TypeAccumulator, count: u64, time: f64) -> QueryTypeStats {
    QueryTypeStats {
        total: acc.total,
        time: humanize_duration(acc.time),
        percentage: percentage(acc.total as f64, count as f64),
        time_percentage: percentage(acc.time, time),
    }
}
