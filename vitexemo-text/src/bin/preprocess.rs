//! Text preprocessing utility
//!
//! Normalizes whitespace in the input JSON texts and writes an `id,text`
//! CSV for the external sentiment estimator.
//!
//! **Usage:**
//! ```bash
//! vitexemo-preprocess [--input-json data/sample_texts.json] [--out-csv data/preprocessed_texts.csv]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use vitexemo_common::config::load_config;
use vitexemo_common::logging::init_tracing;
use vitexemo_text::preprocess::preprocess_texts;

/// Text preprocessing utility
#[derive(Parser, Debug)]
#[command(name = "vitexemo-preprocess")]
#[command(about = "Normalize input texts ahead of polarity estimation")]
struct Args {
    /// Input JSON array of text entries
    #[arg(long, value_name = "FILE")]
    input_json: Option<PathBuf>,

    /// Output CSV of normalized texts
    #[arg(long, value_name = "FILE")]
    out_csv: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);
    config.log_source();

    let input = args.input_json.unwrap_or_else(|| config.paths.text_input());
    let output = args.out_csv.unwrap_or_else(|| config.paths.preprocessed_texts());

    let count = preprocess_texts(&input, &output)
        .with_context(|| format!("Failed to preprocess {}", input.display()))?;
    info!("Preprocessed {} texts", count);

    Ok(())
}
