//! vitexemo-verify - Reproducibility check against published metrics
//!
//! Compares the reproduced metrics tables with the reference tables and
//! prints a pass/fail banner. Exit code 0 on pass, 1 on any failure.
//!
//! **Usage:**
//! ```bash
//! vitexemo-verify --expected expected_results --observed results --tol 0.5
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use vitexemo_common::config::{load_config, resolve_tolerance};
use vitexemo_common::logging::init_tracing;
use vitexemo_verify::{default_checks, run_checklist, write_report, ReportMode, Verifier};

const BANNER_RULE: &str = "============================================";

/// Command-line arguments for vitexemo-verify
#[derive(Parser, Debug)]
#[command(name = "vitexemo-verify")]
#[command(about = "Verify reproduced metrics tables against the published ones")]
#[command(version)]
struct Args {
    /// Directory holding the reference tables
    #[arg(long, value_name = "DIR")]
    expected: Option<PathBuf>,

    /// Directory holding the reproduced tables
    #[arg(long, value_name = "DIR")]
    observed: Option<PathBuf>,

    /// Maximum allowed absolute difference per cell
    #[arg(long)]
    tol: Option<f64>,

    /// Report every failing column and pair instead of stopping at the first
    #[arg(long)]
    exhaustive: bool,

    /// Write a JSON report of all comparisons
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn print_banner(title: &str) {
    println!("{}", BANNER_RULE);
    println!("{:^44}", title);
    println!("{}", BANNER_RULE);
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);
    config.log_source();

    info!(
        "Starting vitexemo-verify v{} (git {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("VITEXEMO_GIT_HASH"),
        env!("VITEXEMO_BUILD_TIMESTAMP"),
        env!("VITEXEMO_BUILD_PROFILE")
    );

    let tolerance = resolve_tolerance(args.tol, &config).context("Invalid tolerance")?;
    let mode = if args.exhaustive || config.verify.exhaustive {
        ReportMode::Exhaustive
    } else {
        ReportMode::FirstFailure
    };
    let verifier = Verifier::new(tolerance)?.with_mode(mode);

    let expected_dir = args.expected.unwrap_or_else(|| config.paths.expected_dir.clone());
    let observed_dir = args.observed.unwrap_or_else(|| config.paths.results_dir.clone());
    info!(
        "Verifying {} against {} (tolerance {})",
        observed_dir.display(),
        expected_dir.display(),
        tolerance
    );

    let report = run_checklist(&verifier, &expected_dir, &observed_dir, &default_checks());

    if let Some(path) = &args.report {
        write_report(path, &report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if report.passed {
        print_banner("REPRODUCTION PASSED");
        Ok(ExitCode::SUCCESS)
    } else {
        for failure in report.failures() {
            println!("{}", failure);
        }
        print_banner("REPRODUCTION FAILED");
        Ok(ExitCode::from(1))
    }
}
