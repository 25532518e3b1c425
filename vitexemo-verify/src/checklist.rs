//! Checklist of reference/reproduced table pairs
//!
//! The reference directory holds the tables as published (named after the
//! paper's table numbers); the observed directory holds the tables the
//! pipeline wrote. Pairs are checked in order.

use serde::Serialize;
use std::path::Path;
use tracing::{error, info};
use vitexemo_common::table_io::ensure_parent_dir;
use vitexemo_common::Result;

use crate::verifier::{ComparisonOutcome, ReportMode, Verifier, VerifyFailure};

/// One expected/observed file name pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckPair {
    pub expected_file: String,
    pub observed_file: String,
}

impl CheckPair {
    pub fn new(expected_file: &str, observed_file: &str) -> Self {
        Self {
            expected_file: expected_file.to_string(),
            observed_file: observed_file.to_string(),
        }
    }
}

/// Textual, visual, then overall metrics
pub fn default_checks() -> Vec<CheckPair> {
    vec![
        CheckPair::new("textual_metrics_table15.csv", "textual_metrics.csv"),
        CheckPair::new("visual_metrics_table16.csv", "visual_metrics.csv"),
        CheckPair::new("overall_metrics.csv", "overall_metrics.csv"),
    ]
}

/// Outcome for one checked pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairResult {
    pub pair: CheckPair,
    pub outcome: ComparisonOutcome,
}

/// Outcome of a checklist walk
///
/// In first-failure mode, pairs after the first failing one are absent
/// from `results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistReport {
    pub tolerance: f64,
    pub mode: ReportMode,
    pub passed: bool,
    pub results: Vec<PairResult>,
}

impl ChecklistReport {
    /// Every failure across all checked pairs, in checklist order
    pub fn failures(&self) -> impl Iterator<Item = &VerifyFailure> {
        self.results.iter().flat_map(|r| r.outcome.failures.iter())
    }

    pub fn first_failure(&self) -> Option<&VerifyFailure> {
        self.failures().next()
    }
}

/// Walk `checks` comparing `expected_dir/<expected_file>` with
/// `observed_dir/<observed_file>`
pub fn run_checklist(
    verifier: &Verifier,
    expected_dir: &Path,
    observed_dir: &Path,
    checks: &[CheckPair],
) -> ChecklistReport {
    let mut results = Vec::with_capacity(checks.len());

    for pair in checks {
        let expected = expected_dir.join(&pair.expected_file);
        let observed = observed_dir.join(&pair.observed_file);
        info!("Comparing {} vs {} ...", expected.display(), observed.display());

        let outcome = verifier.compare_files(&expected, &observed);
        let failed = !outcome.passed();
        for failure in &outcome.failures {
            error!("{}", failure);
        }

        results.push(PairResult {
            pair: pair.clone(),
            outcome,
        });

        if failed && verifier.mode() == ReportMode::FirstFailure {
            break;
        }
    }

    let passed = results.iter().all(|r| r.outcome.passed());
    ChecklistReport {
        tolerance: verifier.tolerance(),
        mode: verifier.mode(),
        passed,
        results,
    }
}

/// Write the report as pretty-printed JSON
pub fn write_report(path: &Path, report: &ChecklistReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    info!("Wrote verification report to {}", path.display());
    Ok(())
}
