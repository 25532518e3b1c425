//! Reproducibility verifier
//!
//! Compares the metrics tables a reproduction run produced against the
//! published reference tables, within a numeric tolerance. A fixed
//! checklist of table pairs is walked in order; the first failing pair
//! ends the walk unless exhaustive reporting is requested.

pub mod checklist;
pub mod verifier;

pub use checklist::{default_checks, run_checklist, write_report, CheckPair, ChecklistReport, PairResult};
pub use verifier::{ComparisonOutcome, ReportMode, Verifier, VerifyFailure};
