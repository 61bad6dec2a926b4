//! Output JSON schema definitions for report data.
//!
//! Schema is versioned to allow future evolution.

use crate::recorder::{Category, ExplainResult, ProfileResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level report for one unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Merged console view and per-category counts
    pub logs: ConsoleLogs,

    /// Completed queries in recording order
    pub queries: Vec<QueryReport>,

    pub query_totals: QueryTotals,

    pub memory_totals: MemoryTotals,

    pub speed_totals: SpeedTotals,

    pub files: Vec<FileReport>,

    pub file_totals: FileTotals,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleLogs {
    pub entries: Vec<ConsoleEntry>,
    pub counts: CategoryCounts,
}

/// Count of completed events per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub console: u64,
    pub memory: u64,
    pub errors: u64,
    pub speed: u64,
    pub benchmarks: u64,
    pub queries: u64,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Console => self.console,
            Category::Memory => self.memory,
            Category::Errors => self.errors,
            Category::Speed => self.speed,
            Category::Benchmarks => self.benchmarks,
            Category::Queries => self.queries,
        }
    }
}

/// One line of the unified console view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEntry {
    Log {
        data: Value,
    },
    Memory {
        /// Humanized size
        data: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        data_type: Option<String>,
    },
    Error {
        data: String,
        file: String,
        line: u32,
    },
    Speed {
        /// Humanized time since the unit of work started
        data: String,
        name: String,
    },
    Benchmark {
        /// Humanized duration
        data: String,
        name: String,
    },
}

impl ConsoleEntry {
    /// Category this entry was recorded under
    pub fn category(&self) -> Category {
        match self {
            ConsoleEntry::Log { .. } => Category::Console,
            ConsoleEntry::Memory { .. } => Category::Memory,
            ConsoleEntry::Error { .. } => Category::Errors,
            ConsoleEntry::Speed { .. } => Category::Speed,
            ConsoleEntry::Benchmark { .. } => Category::Benchmarks,
        }
    }
}

/// A completed query execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub sql: String,

    /// Humanized duration
    pub time: String,

    pub duration_seconds: f64,

    /// Not the first completed execution of this SQL text
    pub duplicate: bool,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub explain: Option<ExplainResult>,

    /// Why the explain callback produced no data
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub explain_error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile: Option<ProfileResult>,

    /// Why the profiler callback produced no data
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTotals {
    /// Completed executions
    pub count: u64,

    /// Distinct SQL texts with at least one completed execution
    pub statements: u64,

    /// SQL texts completed more than once
    pub duplicates: u64,

    /// Humanized total time
    pub time: String,

    pub types: QueryTypeTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTypeTotals {
    pub select: QueryTypeStats,
    pub insert: QueryTypeStats,
    pub update: QueryTypeStats,
    pub delete: QueryTypeStats,
}

impl QueryTypeTotals {
    /// Stats for a lowercase statement keyword
    pub fn get(&self, keyword: &str) -> Option<&QueryTypeStats> {
        match keyword {
            "select" => Some(&self.select),
            "insert" => Some(&self.insert),
            "update" => Some(&self.update),
            "delete" => Some(&self.delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTypeStats {
    pub total: u64,

    /// Humanized time
    pub time: String,

    /// Share of all completed queries, rounded to two decimals
    pub percentage: f64,

    /// Share of total query time, rounded to two decimals
    pub time_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryTotals {
    /// Humanized peak usage
    pub used: String,
    /// Humanized configured limit
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTotals {
    /// Humanized elapsed time
    pub total: String,
    /// Humanized configured maximum execution time
    pub allowed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub name: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTotals {
    pub count: u64,
    pub size: String,
    pub largest: String,
}
