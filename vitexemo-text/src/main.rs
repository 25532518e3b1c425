//! vitexemo-text - Text channel emotion prediction
//!
//! Reads the input JSON entries, predicts one emotion per entry with the
//! rule engine and writes the predictions CSV plus the textual metrics table.
//!
//! **Usage:**
//! ```bash
//! vitexemo-text --input data/sample_texts.json \
//!     --output results/textual_metrics.csv --preds results/text_predictions.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use vitexemo_common::config::load_config;
use vitexemo_common::logging::init_tracing;
use vitexemo_text::polarity::{PolarityEstimator, PolarityTable, SuppliedPolarity};
use vitexemo_text::TextChannel;

/// Command-line arguments for vitexemo-text
#[derive(Parser, Debug)]
#[command(name = "vitexemo-text")]
#[command(about = "Predict emotions from text with the polarity/cue rule engine")]
#[command(version)]
struct Args {
    /// Input JSON array of {id, text, emotion?, polarity?} entries
    #[arg(long)]
    input: Option<PathBuf>,

    /// Textual metrics CSV output
    #[arg(long)]
    output: Option<PathBuf>,

    /// Text predictions CSV output
    #[arg(long)]
    preds: Option<PathBuf>,

    /// Precomputed `id,polarity` CSV from the external sentiment estimator
    #[arg(long, value_name = "FILE")]
    polarity: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);
    config.log_source();

    info!("Starting vitexemo-text v{}", env!("CARGO_PKG_VERSION"));

    let input = args.input.unwrap_or_else(|| config.paths.text_input());
    let out_metrics = args.output.unwrap_or_else(|| config.paths.textual_metrics());
    let out_preds = args.preds.unwrap_or_else(|| config.paths.text_predictions());

    let estimator: Box<dyn PolarityEstimator> = match &args.polarity {
        Some(path) => Box::new(
            PolarityTable::load(path)
                .with_context(|| format!("Failed to load polarity scores from {}", path.display()))?,
        ),
        None => Box::new(SuppliedPolarity),
    };

    let channel = TextChannel::new(estimator);
    let output = channel
        .run_files(&input, &out_metrics, &out_preds)
        .with_context(|| format!("Text channel failed for {}", input.display()))?;

    info!(
        "Predicted {} entries ({} with gold labels)",
        output.records.len(),
        output.gold_count
    );
    info!("Predictions: {}", out_preds.display());
    info!("Metrics: {}", out_metrics.display());

    Ok(())
}
