//! vitexemo-vision - Vision channel predictions and visual metrics
//!
//! With `--image-dir`, lists the images (png, then jpg, then jpeg), looks
//! each one up in the external model's `image,pred` output and writes the
//! ordered vision predictions. Then scores the vision predictions against
//! the gold labels of the text predictions file, paired by position, and
//! writes the visual metrics table (a placeholder when there are no golds).
//!
//! **Usage:**
//! ```bash
//! vitexemo-vision --image-dir data/images --classifications model_output.csv \
//!     --preds results/visual_predictions.csv --output results/visual_metrics.csv
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use vitexemo_common::config::load_config;
use vitexemo_common::logging::init_tracing;
use vitexemo_fuse::{classify_image_dir, run_vision_files, ClassificationTable};

/// Command-line arguments for vitexemo-vision
#[derive(Parser, Debug)]
#[command(name = "vitexemo-vision")]
#[command(about = "Order image classifications and score the vision channel")]
#[command(version)]
struct Args {
    /// Directory of images to classify
    #[arg(long, value_name = "DIR")]
    image_dir: Option<PathBuf>,

    /// External model output as `image,pred` CSV (required with --image-dir)
    #[arg(long, value_name = "FILE")]
    classifications: Option<PathBuf>,

    /// Vision predictions CSV (written with --image-dir, read otherwise)
    #[arg(long, value_name = "FILE")]
    preds: Option<PathBuf>,

    /// CSV carrying gold labels (default: the text predictions file, if present)
    #[arg(long, value_name = "FILE")]
    gold: Option<PathBuf>,

    /// Visual metrics CSV output
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);
    config.log_source();

    info!("Starting vitexemo-vision v{}", env!("CARGO_PKG_VERSION"));

    let preds = args.preds.unwrap_or_else(|| config.paths.visual_predictions());
    let out_metrics = args.output.unwrap_or_else(|| config.paths.visual_metrics());

    if let Some(image_dir) = &args.image_dir {
        let Some(classifications) = &args.classifications else {
            bail!("--classifications is required with --image-dir");
        };
        let classifier = ClassificationTable::load(classifications).with_context(|| {
            format!("Failed to load classifications from {}", classifications.display())
        })?;
        let records = classify_image_dir(image_dir, &classifier, &preds)
            .with_context(|| format!("Failed to classify images in {}", image_dir.display()))?;
        info!("Classified {} images", records.len());
    }

    let gold = match args.gold {
        Some(path) => Some(path),
        None => {
            let default = config.paths.text_predictions();
            default.is_file().then_some(default)
        }
    };
    match &gold {
        Some(path) => info!("Gold labels from {}", path.display()),
        None => info!("No gold source found"),
    }

    let output = run_vision_files(&preds, gold.as_deref(), &out_metrics)
        .with_context(|| format!("Vision scoring failed for {}", preds.display()))?;

    info!("Scored {} vision predictions", output.labels.len());
    info!("Visual metrics: {}", out_metrics.display());

    Ok(())
}
