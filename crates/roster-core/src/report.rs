//! Merge run reports
//!
//! Records what a merge produced so a run can be audited later.

use crate::error::{Error, Result};
use crate::merger::{MergeSummary, SourceRows};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A record of one completed merge run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    /// When the merge finished
    pub timestamp: DateTime<Utc>,
    /// The merged output file
    pub output: PathBuf,
    /// Number of columns in the canonical order
    pub columns: usize,
    /// Total data rows written
    pub total_rows: u64,
    /// Per-source row counts, in merge order
    pub sources: Vec<SourceRows>,
}

impl MergeReport {
    /// Build a report for a finished merge
    pub fn from_summary(summary: &MergeSummary) -> Self {
        Self {
            timestamp: Utc::now(),
            output: summary.output.clone(),
            columns: summary.columns,
            total_rows: summary.total_rows,
            sources: summary.sources.clone(),
        }
    }

    /// Load a report from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the report to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> MergeSummary {
        MergeSummary {
            output: PathBuf::from("final.csv"),
            columns: 8,
            total_rows: 5,
            sources: vec![
                SourceRows {
                    path: PathBuf::from("college1_data.csv"),
                    rows: 3,
                },
                SourceRows {
                    path: PathBuf::from("college2_data.csv"),
                    rows: 2,
                },
            ],
        }
    }

    #[test]
    fn test_report_from_summary() {
        let report = MergeReport::from_summary(&summary());

        assert_eq!(report.output, PathBuf::from("final.csv"));
        assert_eq!(report.columns, 8);
        assert_eq!(report.total_rows, 5);
        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.sources[0].rows, 3);
    }

    #[test]
    fn test_report_source_counts_sum_to_total() {
        let report = MergeReport::from_summary(&summary());
        let sum: u64 = report.sources.iter().map(|s| s.rows).sum();

        assert_eq!(sum, report.total_rows);
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = MergeReport::from_summary(&summary());

        let json = serde_json::to_string_pretty(&report).unwrap();
        let loaded: MergeReport = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.timestamp, report.timestamp);
        assert_eq!(loaded.output, report.output);
        assert_eq!(loaded.columns, report.columns);
        assert_eq!(loaded.total_rows, report.total_rows);
        assert_eq!(loaded.sources, report.sources);
    }
}
