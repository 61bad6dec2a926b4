//! Request Profiler CLI
//!
//! Summarizes saved recorder snapshots into reports and runs a demo
//! recording.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use request_profiler::commands::{
    display_schema, display_version, execute_demo, execute_summarize, validate_args, DemoArgs,
    SummarizeArgs,
};

/// Request Profiler - per-request instrumentation reports
#[derive(Parser, Debug)]
#[command(name = "request-profiler")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a saved snapshot into a report
    Summarize {
        /// Snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Output path for JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Peak memory in bytes
        #[arg(long)]
        peak_memory: Option<u64>,

        /// Configured memory limit in bytes
        #[arg(long, env = "PROFILER_MEMORY_LIMIT")]
        memory_limit: Option<u64>,

        /// Configured maximum execution time in seconds
        #[arg(long, env = "PROFILER_MAX_EXECUTION_TIME")]
        max_execution_time: Option<f64>,

        /// Elapsed wall time in seconds
        #[arg(long)]
        elapsed: Option<f64>,

        /// File to list under file totals (repeatable)
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Record a scripted unit of work and report on it
    Demo {
        /// Output path for JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for the raw snapshot
        #[arg(long)]
        snapshot_out: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Summarize {
            snapshot,
            output,
            peak_memory,
            memory_limit,
            max_execution_time,
            elapsed,
            files,
            summary,
        } => {
            let args = SummarizeArgs {
                snapshot,
                output_json: output,
                peak_memory,
                memory_limit,
                max_execution_time,
                elapsed,
                files,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_summarize(args)?;
        }

        Commands::Demo {
            output,
            snapshot_out,
            summary,
        } => {
            execute_demo(DemoArgs {
                output_json: output,
                snapshot_out,
                print_summary: summary,
            })?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
