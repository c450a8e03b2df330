//! JSON comparison reports
//!
//! Only built with the `diagnostics` feature.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::compare::Comparison;
use crate::diff::DiffSummary;
use crate::error::{CompareError, CompareResult};

/// Per-input details recorded in a report
#[derive(Debug, Serialize)]
pub struct InputReport {
    pub path: String,
    pub frames: usize,
    pub duration_secs: Option<u32>,
}

/// Everything known about one comparison
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub first: InputReport,
    pub second: InputReport,
    pub summary: DiffSummary,
    pub bit_error_rate: f64,
}

impl ComparisonReport {
    pub fn new(first: &Path, second: &Path, comparison: &Comparison) -> Self {
        let summary = comparison.summary.clone();
        Self {
            generated_at: Utc::now(),
            first: InputReport {
                path: first.display().to_string(),
                frames: summary.len_a,
                duration_secs: comparison.first.duration_secs,
            },
            second: InputReport {
                path: second.display().to_string(),
                frames: summary.len_b,
                duration_secs: comparison.second.duration_secs,
            },
            bit_error_rate: summary.bit_error_rate(),
            summary,
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> CompareResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| CompareError::Report(e.to_string()))?;
        log::info!("Wrote report to {}", path.display());
        Ok(())
    }
}
