use crate::utils::config::SCHEMA_VERSION;

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Request Profiler Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  logs: object               - Unified console view");
        println!("    entries: array           - Tagged entries (log, memory, error, speed, benchmark)");
        println!("    counts: object           - Completed events per category");
        println!("  queries: array             - Completed queries");
        println!("    sql: string              - Query text");
        println!("    time: string             - Humanized duration");
        println!("    duplicate: bool          - Not the first execution of this text");
        println!("    explain/profile: any?    - Callback data (empty array on failure)");
        println!("  query_totals: object       - Count, statements, duplicates, time");
        println!("    types: object            - select/insert/update/delete breakdown");
        println!("  memory_totals: object      - Peak usage and configured limit");
        println!("  speed_totals: object       - Elapsed and allowed execution time");
        println!("  files, file_totals         - Listed resources and their sizes");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Request Profiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("An in-process instrumentation recorder and report aggregator.");
}
