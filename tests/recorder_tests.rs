use request_profiler::probe::ManualProbes;
use request_profiler::recorder::{query_key, Recorder, Timing};

fn recorder_at(start: f64) -> (Recorder, ManualProbes) {
    let probes = ManualProbes::new(start);
    (Recorder::with_probes(probes.clone()), probes)
}

#[test]
fn test_identical_sql_pairs_into_one_closed_record() {
    let (mut recorder, probes) = recorder_at(50.0);

    recorder.log_query("SELECT * FROM posts", None);
    probes.advance(0.003);
    recorder.log_query("SELECT * FROM posts", None);

    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.queries.count, 1);
    assert_eq!(snapshot.queries.entries.len(), 1);

    let records = &snapshot.queries.entries[0].records;
    assert_eq!(records.len(), 1);
    assert!(records[0].duration().unwrap() >= 0.0);
}

#[test]
fn test_third_identical_call_opens_new_record() {
    let (mut recorder, _) = recorder_at(0.0);

    for _ in 0..3 {
        recorder.log_query("SELECT * FROM posts", None);
    }

    let snapshot = recorder.snapshot();
    let sequence = &snapshot.queries.entries[0];
    assert_eq!(sequence.key, query_key("SELECT * FROM posts"));
    assert_eq!(sequence.records.len(), 2);
    assert!(!sequence.records[0].timing.is_open());
    assert_eq!(sequence.records[1].timing, Timing::Open);
    assert_eq!(snapshot.queries.count, 1);
}

#[test]
fn test_distinct_sql_never_shares_key() {
    let (mut recorder, _) = recorder_at(0.0);

    recorder.log_query("SELECT 1 FROM a", None);
    recorder.log_query("SELECT 1 FROM b", None);
    recorder.log_query("SELECT 1 FROM a", None);
    recorder.log_query("SELECT 1 FROM b", None);

    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.queries.entries.len(), 2);
    assert_ne!(snapshot.queries.entries[0].key, snapshot.queries.entries[1].key);
    assert_eq!(snapshot.queries.count, 2);
    for sequence in &snapshot.queries.entries {
        assert_eq!(sequence.records.len(), 1);
    }
}

#[test]
fn test_empty_sql_recorded_as_is() {
    let (mut recorder, _) = recorder_at(0.0);

    recorder.log_query("", None);
    recorder.log_query("", None);

    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.queries.count, 1);
    assert_eq!(snapshot.queries.entries[0].records[0].sql, "");
}

#[test]
fn test_benchmark_pair_counts_once() {
    let (mut recorder, probes) = recorder_at(10.0);

    recorder.log_benchmark("render");
    assert_eq!(recorder.snapshot().benchmarks.count, 0);

    probes.advance(0.75);
    recorder.log_benchmark("render");

    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.benchmarks.count, 1);
    assert_eq!(snapshot.benchmarks.entries.len(), 1);

    let record = &snapshot.benchmarks.entries[0].record;
    assert_eq!(record.label, "render");
    assert!(record.timing.end_seconds().unwrap() >= record.start_seconds);
}

#[test]
fn test_odd_benchmark_calls_leave_one_open() {
    let (mut recorder, _) = recorder_at(0.0);

    for _ in 0..3 {
        recorder.log_benchmark("render");
    }

    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.benchmarks.count, 1);

    let open: Vec<_> = snapshot
        .benchmarks
        .entries
        .iter()
        .filter(|keyed| keyed.record.timing.is_open())
        .collect();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].key, "benchmark_ render");
}

#[derive(Debug)]
struct LookupError;

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user not found")
    }
}

impl std::error::Error for LookupError {}

#[test]
fn test_error_override_message_wins() {
    let (mut recorder, _) = recorder_at(0.0);

    recorder.log_error(&LookupError, Some("login failed"));

    let error = &recorder.snapshot().errors.entries[0];
    assert_eq!(error.message, "login failed");
}

#[test]
fn test_error_without_override_keeps_origin() {
    let (mut recorder, _) = recorder_at(0.0);

    let line = line!() + 1;
    recorder.log_error(&LookupError, None);
    recorder.log_error(&LookupError, Some(""));

    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.errors.count, 2);
    for error in &snapshot.errors.entries {
        assert_eq!(error.message, "user not found");
        assert!(error.file.ends_with("recorder_tests.rs"));
    }
    assert_eq!(snapshot.errors.entries[0].line, line);
}
