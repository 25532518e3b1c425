//! Tolerance-based metrics table comparison
//!
//! Comparison of one expected/observed table pair runs in stages, and each
//! stage only runs if the previous one passed:
//! 1. Both files exist (expected checked first)
//! 2. Both files parse as metrics tables
//! 3. Headers are identical in name and order
//! 4. Metric row labels are identical in name and order
//! 5. Every numeric cell is within `tolerance` of its counterpart
//!
//! Stage 5 is evaluated column by column. In [`ReportMode::FirstFailure`]
//! the first failing column ends the comparison; in
//! [`ReportMode::Exhaustive`] every failing column is reported.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use vitexemo_common::config::validate_tolerance;
use vitexemo_common::table_io::read_metrics_table;
use vitexemo_common::{MetricsTable, Result};

/// Why a table pair failed to reconcile
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerifyFailure {
    #[error("Expected file missing: {}", path.display())]
    ExpectedMissing { path: PathBuf },

    #[error("Observed file missing: {}", path.display())]
    ObservedMissing { path: PathBuf },

    #[error("Cannot read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Column mismatch in {file}: expected {expected:?}, observed {observed:?}")]
    ColumnMismatch {
        file: String,
        expected: Vec<String>,
        observed: Vec<String>,
    },

    #[error("Row mismatch in {file}: expected {expected:?}, observed {observed:?}")]
    RowMismatch {
        file: String,
        expected: Vec<String>,
        observed: Vec<String>,
    },

    #[error("Mismatch in column '{column}' of {file}. Max difference: {max_diff}")]
    ToleranceExceeded {
        file: String,
        column: String,
        max_diff: f64,
    },
}

/// Result of comparing one table pair
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComparisonOutcome {
    pub failures: Vec<VerifyFailure>,
}

impl ComparisonOutcome {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn fail(failure: VerifyFailure) -> Self {
        Self {
            failures: vec![failure],
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn first_failure(&self) -> Option<&VerifyFailure> {
        self.failures.first()
    }
}

/// How much to report once something fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Stop at the first failing column (and, in a checklist, pair)
    #[default]
    FirstFailure,
    /// Keep going and collect every failure
    Exhaustive,
}

/// Absolute difference of two cells; a lone NaN never matches
fn cell_difference(expected: f64, observed: f64) -> f64 {
    match (expected.is_nan(), observed.is_nan()) {
        (true, true) => 0.0,
        (false, false) => (expected - observed).abs(),
        _ => f64::INFINITY,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Metrics table comparator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verifier {
    tolerance: f64,
    mode: ReportMode,
}

impl Verifier {
    /// Create a verifier; the tolerance must be finite and non-negative
    pub fn new(tolerance: f64) -> Result<Self> {
        Ok(Self {
            tolerance: validate_tolerance(tolerance)?,
            mode: ReportMode::FirstFailure,
        })
    }

    pub fn with_mode(mut self, mode: ReportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Compare two loaded tables; `file` names the pair in failure messages
    pub fn compare_tables(
        &self,
        file: &str,
        expected: &MetricsTable,
        observed: &MetricsTable,
    ) -> ComparisonOutcome {
        let expected_header = expected.header();
        let observed_header = observed.header();
        if expected_header != observed_header {
            return ComparisonOutcome::fail(VerifyFailure::ColumnMismatch {
                file: file.to_string(),
                expected: expected_header,
                observed: observed_header,
            });
        }

        let expected_rows: Vec<String> = expected.rows().iter().map(|r| r.metric.clone()).collect();
        let observed_rows: Vec<String> = observed.rows().iter().map(|r| r.metric.clone()).collect();
        if expected_rows != observed_rows {
            return ComparisonOutcome::fail(VerifyFailure::RowMismatch {
                file: file.to_string(),
                expected: expected_rows,
                observed: observed_rows,
            });
        }

        let mut outcome = ComparisonOutcome::pass();
        for (idx, column) in expected.columns().iter().enumerate() {
            let diffs = expected
                .rows()
                .iter()
                .zip(observed.rows())
                .map(|(e, o)| cell_difference(e.values[idx], o.values[idx]));
            let max_diff = diffs.fold(0.0_f64, f64::max);

            if max_diff > self.tolerance {
                debug!(
                    "Column '{}' of {} exceeds tolerance {} (max difference {})",
                    column, file, self.tolerance, max_diff
                );
                outcome.failures.push(VerifyFailure::ToleranceExceeded {
                    file: file.to_string(),
                    column: column.clone(),
                    max_diff,
                });
                if self.mode == ReportMode::FirstFailure {
                    break;
                }
            }
        }

        outcome
    }

    /// Compare two table files
    pub fn compare_files(&self, expected: &Path, observed: &Path) -> ComparisonOutcome {
        if !expected.is_file() {
            return ComparisonOutcome::fail(VerifyFailure::ExpectedMissing {
                path: expected.to_path_buf(),
            });
        }
        if !observed.is_file() {
            return ComparisonOutcome::fail(VerifyFailure::ObservedMissing {
                path: observed.to_path_buf(),
            });
        }

        let expected_table = match read_metrics_table(expected) {
            Ok(table) => table,
            Err(e) => {
                return ComparisonOutcome::fail(VerifyFailure::Unreadable {
                    path: expected.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };
        let observed_table = match read_metrics_table(observed) {
            Ok(table) => table,
            Err(e) => {
                return ComparisonOutcome::fail(VerifyFailure::Unreadable {
                    path: observed.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        self.compare_tables(&display_name(observed), &expected_table, &observed_table)
    }
}
