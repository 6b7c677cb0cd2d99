use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Totals produced by one pass of the duration aggregator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Aggregation {
    pub total_seconds: f64,
    pub file_count: usize,
    /// Files the probe could not read; each contributed zero seconds.
    pub unreadable_files: usize,
}

/// Final outcome of a scan-and-aggregate run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateResult {
    pub total_seconds: f64,
    pub total_bytes: u64,
    pub file_count: usize,
    pub unreadable_files: usize,
    pub finished_at: DateTime<Local>,
}

impl AggregateResult {
    #[must_use]
    pub fn new(aggregation: Aggregation, total_bytes: u64) -> Self {
        Self {
            total_seconds: aggregation.total_seconds,
            total_bytes,
            file_count: aggregation.file_count,
            unreadable_files: aggregation.unreadable_files,
            finished_at: Local::now(),
        }
    }

    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.total_seconds / 3600.0
    }

    #[must_use]
    pub fn has_unreadable(&self) -> bool {
        self.unreadable_files > 0
    }
}
