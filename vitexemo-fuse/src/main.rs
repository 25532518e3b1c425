//! vitexemo-fuse - Multimodal fusion and overall evaluation
//!
//! Pairs text and vision predictions by position, applies the text-first
//! fusion policy, writes the fused predictions and the overall metrics
//! table.
//!
//! **Usage:**
//! ```bash
//! vitexemo-fuse --text-preds results/text_predictions.csv \
//!     --vision-preds results/visual_predictions.csv --output results/overall_metrics.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use vitexemo_common::config::load_config;
use vitexemo_common::logging::init_tracing;
use vitexemo_fuse::run_fusion_files;

/// Command-line arguments for vitexemo-fuse
#[derive(Parser, Debug)]
#[command(name = "vitexemo-fuse")]
#[command(about = "Fuse text and vision emotion predictions and score the result")]
#[command(version)]
struct Args {
    /// Text channel predictions CSV
    #[arg(long, value_name = "FILE")]
    text_preds: Option<PathBuf>,

    /// Vision channel predictions CSV
    #[arg(long, value_name = "FILE")]
    vision_preds: Option<PathBuf>,

    /// Overall metrics CSV output
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Fused predictions CSV output
    #[arg(long, value_name = "FILE")]
    fused: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);
    config.log_source();

    info!("Starting vitexemo-fuse v{}", env!("CARGO_PKG_VERSION"));

    let text_preds = args.text_preds.unwrap_or_else(|| config.paths.text_predictions());
    let vision_preds = args.vision_preds.unwrap_or_else(|| config.paths.visual_predictions());
    let out_metrics = args.output.unwrap_or_else(|| config.paths.overall_metrics());
    let out_fused = args.fused.unwrap_or_else(|| config.paths.fused_predictions());

    let output = run_fusion_files(&text_preds, &vision_preds, &out_metrics, &out_fused)
        .context("Fusion failed")?;

    info!(
        "Fused {} pairs ({} unpaired items dropped)",
        output.fused.len(),
        output.dropped
    );
    info!("Fused predictions: {}", out_fused.display());
    info!("Overall metrics: {}", out_metrics.display());

    Ok(())
}
