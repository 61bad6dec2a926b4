//! Query pairing.
//!
//! Every execution of the same SQL text lands in one sequence. A call
//! whose sequence ends in an open record closes it; any other call
//! opens a new record at the end of the sequence.

use super::entries::{CategoryLog, ExplainResult, QueryRecord, Timing};
use super::keys::query_key;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All executions of one SQL text, in call order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySequence {
    pub key: String,
    pub records: Vec<QueryRecord>,
}

impl QuerySequence {
    /// Closed records only, with their position in the sequence
    pub fn closed(&self) -> impl Iterator<Item = (usize, &QueryRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.timing.is_open())
    }
}

/// What a `log_query` call did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryTransition {
    Opened,
    Closed { duration: f64 },
}

/// Query buffer with a key index over the sequences
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    log: CategoryLog<QuerySequence>,
    index: HashMap<String, usize>,
}

impl QueryLog {
    /// Record one call for `sql` at time `now`
    pub fn record(&mut self, sql: &str, explain: Option<ExplainResult>, now: f64) -> QueryTransition {
        let key = query_key(sql);

        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                self.log.entries.push(QuerySequence {
                    key: key.clone(),
                    records: Vec::new(),
                });
                let position = self.log.entries.len() - 1;
                self.index.insert(key, position);
                position
            }
        };

        let sequence = &mut self.log.entries[position];

        if let Some(tail) = sequence.records.last_mut().filter(|tail| tail.timing.is_open()) {
            tail.timing = Timing::Closed { end_seconds: now };
            tail.explain = explain;
            // Counted on close only; a call that opens never counts
            self.log.count += 1;

            let duration = now - tail.start_seconds;
            debug!("Closed query {} after {:.6}s", &sequence.key[..12], duration);
            return QueryTransition::Closed { duration };
        }

        sequence.records.push(QueryRecord {
            sql: sql.to_string(),
            start_seconds: now,
            timing: Timing::Open,
            explain: None,
        });
        debug!(
            "Opened query {} (execution {})",
            &sequence.key[..12],
            sequence.records.len()
        );

        QueryTransition::Opened
    }

    pub fn count(&self) -> u64 {
        self.log.count
    }

    pub fn to_log(&self) -> CategoryLog<QuerySequence> {
        self.log.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_opens_without_counting() {
        let mut log = QueryLog::default();
        let transition = log.record("SELECT 1", None, 1.0);

        assert_eq!(transition, QueryTransition::Opened);
        assert_eq!(log.count(), 0);
        assert!(log.to_log().entries[0].records[0].timing.is_open());
    }

    #[test]
    fn test_second_call_closes() {
        let mut log = QueryLog::default();
        log.record("SELECT 1", None, 1.0);
        let transition = log.record("SELECT 1", Some(serde_json::json!({"rows": 1})), 1.5);

        assert_eq!(transition, QueryTransition::Closed { duration: 0.5 });
        assert_eq!(log.count(), 1);

        let snapshot = log.to_log();
        let record = &snapshot.entries[0].records[0];
        assert_eq!(record.timing, Timing::Closed { end_seconds: 1.5 });
        assert_eq!(record.explain, Some(serde_json::json!({"rows": 1})));
    }

    #[test]
    fn test_third_call_opens_next_execution() {
        let mut log = QueryLog::default();
        log.record("SELECT 1", None, 1.0);
        log.record("SELECT 1", None, 1.5);
        log.record("SELECT 1", None, 2.0);

        let snapshot = log.to_log();
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].records.len(), 2);
        assert!(snapshot.entries[0].records[1].timing.is_open());
        assert_eq!(log.count(), 1);
    }

    #[test]
    fn test_count_tracks_closes_only() {
        let mut log = QueryLog::default();
        for i in 0..4 {
            log.record("SELECT 1", None, i as f64);
        }

        let snapshot = log.to_log();
        assert_eq!(log.count(), 2);
        assert_eq!(snapshot.count, 2);
        assert_eq!(snapshot.entries[0].records.len(), 2);
        assert!(snapshot.entries[0].records.iter().all(|r| !r.timing.is_open()));

        log.record("SELECT 1", None, 4.0);
        assert_eq!(log.count(), 2);
    }

    #[test]
    fn test_different_sql_gets_own_sequence() {
        let mut log = QueryLog::default();
        log.record("SELECT 1", None, 1.0);
        let transition = log.record("SELECT  1", None, 1.5);

        assert_eq!(transition, QueryTransition::Opened);
        assert_eq!(log.to_log().entries.len(), 2);
        assert_eq!(log.count(), 0);
    }
}
