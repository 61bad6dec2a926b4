//! Merge the category buffers into one console view.

use super::humanize::{humanize_bytes, humanize_duration};
use crate::recorder::Snapshot;
use crate::report::{CategoryCounts, ConsoleEntry, ConsoleLogs};

/// Build the unified console view
///
/// Console messages come first, as logged. Memory, error, speed and
/// completed benchmark entries follow, one per recorded entry, with
/// their values humanized. Speed marks are shown relative to the start
/// of the unit of work. Open benchmarks are left out.
pub fn merge_console(snapshot: &Snapshot) -> ConsoleLogs {
    let mut entries: Vec<ConsoleEntry> = snapshot
        .console
        .entries
        .iter()
        .map(|message| ConsoleEntry::Log {
            data: message.data.clone(),
        })
        .collect();

    entries.extend(snapshot.memory.entries.iter().map(|sample| ConsoleEntry::Memory {
        data: humanize_bytes(sample.bytes),
        name: sample.label.clone(),
        data_type: sample.value_type.clone(),
    }));

    entries.extend(snapshot.errors.entries.iter().map(|error| ConsoleEntry::Error {
        data: error.message.clone(),
        file: error.file.clone(),
        line: error.line,
    }));

    entries.extend(snapshot.speed.entries.iter().map(|mark| ConsoleEntry::Speed {
        data: humanize_duration(mark.timestamp_seconds - snapshot.started_at),
        name: mark.label.clone(),
    }));

    entries.extend(snapshot.benchmarks.entries.iter().filter_map(|keyed| {
        keyed.record.duration().map(|duration| ConsoleEntry::Benchmark {
            data: humanize_duration(duration),
            name: keyed.record.label.clone(),
        })
    }));

    ConsoleLogs {
        entries,
        counts: CategoryCounts {
            console: snapshot.console.count,
            memory: snapshot.memory.count,
            errors: snapshot.errors.count,
            speed: snapshot.speed.count,
            benchmarks: snapshot.benchmarks.count,
            queries: snapshot.queries.count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ManualProbes;
    use crate::recorder::{Category, Recorder};

    #[test]
    fn test_merge_order_and_formatting() {
        let probes = ManualProbes::new(10.0);
        let mut recorder = Recorder::with_probes(probes.clone());

        recorder.log("hello");
        probes.set_memory(1536);
        recorder.log_memory(None);
        probes.advance(0.005);
        recorder.log_speed(Some("checkpoint"));

        let logs = merge_console(&recorder.snapshot());

        let categories: Vec<Category> = logs.entries.iter().map(|e| e.category()).collect();
        assert_eq!(categories, vec![Category::Console, Category::Memory, Category::Speed]);

        match &logs.entries[1] {
            ConsoleEntry::Memory { data, .. } => assert_eq!(data, "1.50 kB"),
            other => panic!("unexpected entry {:?}", other),
        }
        match &logs.entries[2] {
            ConsoleEntry::Speed { data, name } => {
                assert!(data.ends_with(" ms"));
                assert_eq!(name, "checkpoint");
            }
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_open_benchmark_not_merged() {
        let probes = ManualProbes::new(0.0);
        let mut recorder = Recorder::with_probes(probes.clone());

        recorder.log_benchmark("done");
        probes.advance(2.0);
        recorder.log_benchmark("done");
        recorder.log_benchmark("pending");

        let logs = merge_console(&recorder.snapshot());

        assert_eq!(logs.entries.len(), 1);
        assert_eq!(
            logs.entries[0],
            ConsoleEntry::Benchmark {
                data: "2.000 s".to_string(),
                name: "done".to_string(),
            }
        );
        assert_eq!(logs.counts.benchmarks, 1);
    }
}
