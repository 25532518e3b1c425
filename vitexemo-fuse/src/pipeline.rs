//! Score the vision stream, fuse the two channels and score the fused stream
//!
//! Gold labels come from the text predictions file and are paired with the
//! other stream by position, like fusion itself. A metrics table is only
//! produced when that file carries at least one gold label; the golds of
//! the first `n` rows (n = number of paired predictions) are scored.
//! Without golds, the metrics artifact is an empty placeholder.

use std::path::Path;
use tracing::{info, warn};
use vitexemo_common::table_io::write_metrics_table;
use vitexemo_common::{score, EmotionLabel, MetricsTable, Result};

use crate::fusion::{fuse_labels, write_fused_records, FusedRecord};
use crate::predictions::{load_predictions, PredictionTable};

/// Result of one fusion pass
#[derive(Debug, Clone, PartialEq)]
pub struct FusionOutput {
    pub fused: Vec<FusedRecord>,
    pub metrics: MetricsTable,
    /// Items past the end of the shorter channel
    pub dropped: usize,
}

/// Score `preds` against the first `preds.len()` golds, or return the
/// placeholder when there are no golds
fn score_against_golds(
    stream: &str,
    preds: &[Option<EmotionLabel>],
    golds: Option<Vec<Option<EmotionLabel>>>,
) -> Result<MetricsTable> {
    match golds {
        Some(golds) => {
            let n = preds.len().min(golds.len());
            if n < preds.len() {
                warn!(
                    "Only {} of {} {} predictions have a gold row",
                    n,
                    preds.len(),
                    stream
                );
            }
            let table = score(&golds[..n], &preds[..n])?;
            info!("Scored {} {} predictions", n, stream);
            Ok(table)
        }
        None => {
            info!("No gold labels available, writing placeholder {} metrics", stream);
            Ok(MetricsTable::empty())
        }
    }
}

/// Result of one vision scoring pass
#[derive(Debug, Clone, PartialEq)]
pub struct VisionOutput {
    pub labels: Vec<Option<EmotionLabel>>,
    pub metrics: MetricsTable,
}

/// Score the vision stream against the golds carried by `gold_source`
///
/// An empty vision stream (no images) gives the placeholder table.
pub fn evaluate_vision(
    vision: &PredictionTable,
    gold_source: Option<&PredictionTable>,
) -> Result<VisionOutput> {
    let labels = vision.labels();
    let metrics = if labels.is_empty() {
        warn!("No vision predictions, writing placeholder visual metrics");
        MetricsTable::empty()
    } else {
        score_against_golds("vision", &labels, gold_source.and_then(|g| g.golds()))?
    };
    Ok(VisionOutput { labels, metrics })
}

/// File-to-file vision scoring pass
pub fn run_vision_files(
    vision_preds: &Path,
    gold_source: Option<&Path>,
    out_metrics: &Path,
) -> Result<VisionOutput> {
    let vision = load_predictions(vision_preds)?;
    let golds = gold_source.map(load_predictions).transpose()?;
    info!(
        "Loaded {} vision predictions{}",
        vision.len(),
        if golds.is_some() { " with a gold source" } else { "" }
    );

    let output = evaluate_vision(&vision, golds.as_ref())?;
    write_metrics_table(out_metrics, &output.metrics)?;
    Ok(output)
}

/// Fuse two loaded prediction tables and score the result
pub fn evaluate_fusion(text: &PredictionTable, vision: &PredictionTable) -> Result<FusionOutput> {
    let fused = fuse_labels(&text.labels(), &vision.labels());

    let dropped = text.len().max(vision.len()) - fused.len();
    if dropped > 0 {
        warn!(
            "Channel lengths differ (text {}, vision {}); dropping {} unpaired items",
            text.len(),
            vision.len(),
            dropped
        );
    }

    let preds: Vec<_> = fused.iter().map(|r| r.fused).collect();
    let metrics = score_against_golds("fused", &preds, text.golds())?;

    Ok(FusionOutput {
        fused,
        metrics,
        dropped,
    })
}

/// Full file-to-file fusion pass
pub fn run_fusion_files(
    text_preds: &Path,
    vision_preds: &Path,
    out_metrics: &Path,
    out_fused: &Path,
) -> Result<FusionOutput> {
    let text = load_predictions(text_preds)?;
    let vision = load_predictions(vision_preds)?;
    info!(
        "Loaded {} text and {} vision predictions",
        text.len(),
        vision.len()
    );

    let output = evaluate_fusion(&text, &vision)?;
    write_fused_records(out_fused, &output.fused)?;
    write_metrics_table(out_metrics, &output.metrics)?;
    Ok(output)
}
