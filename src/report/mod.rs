//! Report schema handed to renderers.
//!
//! Every display value is already formatted and every percentage already
//! rounded, so a renderer only lays the data out.

pub mod schema;

pub use schema::{
    CategoryCounts, ConsoleEntry, ConsoleLogs, FileReport, FileTotals, MemoryTotals, QueryReport,
    QueryTotals, QueryTypeStats, QueryTypeTotals, Report, SpeedTotals,
};
