//! Demo command implementation.
//!
//! Records a short scripted unit of work on a hand-driven clock and
//! memory counter, then aggregates it like any other run. The output is
//! the same on every run apart from `generated_at`.

use crate::aggregator::{Aggregator, SummaryInputs};
use crate::output::{render_text_summary, write_report, write_snapshot};
use crate::probe::{FileInfo, ManualProbes};
use crate::recorder::Recorder;
use anyhow::{Context, Result};
use log::info;
use serde_json::json;
use std::path::PathBuf;

/// Clock reading the demo unit of work starts at
const DEMO_START_SECONDS: f64 = 1_700_000_000.0;

/// Arguments for the demo command
#[derive(Debug, Clone, Default)]
pub struct DemoArgs {
    /// Output path for the JSON report
    pub output_json: Option<PathBuf>,

    /// Output path for the raw snapshot
    pub snapshot_out: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

/// Execute the demo command
pub fn execute_demo(args: DemoArgs) -> Result<()> {
    info!("Recording demo unit of work");

    let probes = ManualProbes::new(DEMO_START_SECONDS);
    let mut recorder = Recorder::with_probes(probes.clone());
    probes.set_memory(512 * 1024);

    recorder.log("Test message");

    let missing = std::fs::read("/nonexistent/request-profiler/demo.cfg");
    if let Err(e) = missing {
        recorder.log_error(&e, None);
    }

    probes.set_memory(768 * 1024);
    recorder.log_memory(Some("Memory consumption at this point"));

    recorder.log_benchmark("Bench");
    probes.advance(0.005);
    recorder.log_benchmark("Bench");

    let user_ids: Vec<u64> = (1..=100).collect();
    recorder.log_value_memory(Some("user ids"), &user_ids);

    for (sql, seconds) in [
        ("SELECT * FROM users WHERE id = 1", 0.002),
        ("SELECT * FROM users WHERE id = 1", 0.0004),
        ("UPDATE users SET seen = 1 WHERE id = 1", 0.003),
    ] {
        recorder.log_query(sql, None);
        probes.advance(seconds);
        recorder.log_query(sql, Some(json!([{ "table": "users", "type": "const" }])));
    }

    probes.set_memory(1024 * 1024);
    probes.set_memory(640 * 1024);
    recorder.log_speed(None);
    recorder.log_peak_memory(None);

    // Response written at a fixed offset from the start
    probes.set_now(recorder.started_at() + 0.025);
    let snapshot = recorder.snapshot();

    if let Some(path) = &args.snapshot_out {
        write_snapshot(&snapshot, path).context("Failed to write snapshot JSON")?;
        info!("✓ Snapshot written to: {}", path.display());
    }

    let inputs = SummaryInputs::from_probes(&probes, recorder.started_at())
        .with_memory_limit(128 * 1024 * 1024)
        .with_max_execution_time(30.0)
        .with_files(vec![
            FileInfo::new("src/main.rs", 4_210),
            FileInfo::new("src/lib.rs", 1_180),
        ]);

    let report = Aggregator::new().summarize(&snapshot, &inputs);

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if args.print_summary || args.output_json.is_none() {
        println!("{}", render_text_summary(&report));
    }

    Ok(())
}
