//! Text channel: entries in, predictions and textual metrics out
//!
//! For each entry, obtain polarity from the estimator, run the rule engine
//! and record the prediction. When any entry carries a gold label, the
//! predictions are aligned to the golds by id (the last prediction for a
//! repeated id wins) and scored; otherwise the metrics artifact is an empty
//! placeholder.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};
use vitexemo_common::table_io::write_metrics_table;
use vitexemo_common::{score, EmotionLabel, MetricsTable, Result};

use crate::polarity::PolarityEstimator;
use crate::records::{load_text_entries, write_item_records, ItemRecord, TextEntry};
use crate::rules::decide;

/// Everything one text channel pass produces
#[derive(Debug, Clone, PartialEq)]
pub struct TextChannelOutput {
    pub records: Vec<ItemRecord>,
    /// Scored table, or the placeholder when no entry had a gold label
    pub metrics: MetricsTable,
    pub gold_count: usize,
}

/// Text channel runner
pub struct TextChannel {
    estimator: Box<dyn PolarityEstimator>,
}

impl TextChannel {
    pub fn new(estimator: Box<dyn PolarityEstimator>) -> Self {
        Self { estimator }
    }

    /// Classify a single entry
    pub fn classify(&self, entry: &TextEntry) -> ItemRecord {
        let polarity = self.estimator.polarity(entry);
        let decision = decide(polarity, entry.text.as_deref());
        debug!(
            "Entry {}: polarity {:.3} -> {} ({:?}, cue {:?})",
            entry.id, polarity, decision.label, decision.band, decision.cue
        );

        ItemRecord {
            id: entry.id.clone(),
            text: entry.text_or_empty().to_string(),
            polarity,
            pred: decision.label,
            gold: entry.gold(),
        }
    }

    /// Classify every entry and score against the available golds
    pub fn run(&self, entries: &[TextEntry]) -> Result<TextChannelOutput> {
        let records: Vec<ItemRecord> = entries.iter().map(|e| self.classify(e)).collect();

        let annotated: Vec<&TextEntry> = entries.iter().filter(|e| e.emotion.is_some()).collect();
        if annotated.is_empty() {
            info!("No gold labels in input, writing placeholder textual metrics");
            return Ok(TextChannelOutput {
                records,
                metrics: MetricsTable::empty(),
                gold_count: 0,
            });
        }

        let unknown = annotated.iter().filter(|e| e.gold().is_none()).count();
        if unknown > 0 {
            warn!("{} gold labels are outside the emotion taxonomy", unknown);
        }

        let id_to_pred: HashMap<&str, EmotionLabel> =
            records.iter().map(|r| (r.id.as_str(), r.pred)).collect();
        let golds: Vec<Option<EmotionLabel>> = annotated.iter().map(|e| e.gold()).collect();
        let aligned: Vec<Option<EmotionLabel>> = annotated
            .iter()
            .map(|e| id_to_pred.get(e.id.as_str()).copied())
            .collect();

        let metrics = score(&golds, &aligned)?;
        info!("Scored {} annotated text entries", golds.len());

        Ok(TextChannelOutput {
            records,
            metrics,
            gold_count: golds.len(),
        })
    }

    /// Full file-to-file pass
    pub fn run_files(
        &self,
        input_json: &Path,
        out_metrics: &Path,
        out_preds: &Path,
    ) -> Result<TextChannelOutput> {
        let entries = load_text_entries(input_json)?;
        let output = self.run(&entries)?;
        write_item_records(out_preds, &output.records)?;
        write_metrics_table(out_metrics, &output.metrics)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polarity::{PolarityTable, SuppliedPolarity};
    use serde_json::json;

    fn entries(value: serde_json::Value) -> Vec<TextEntry> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_run_without_gold_gives_placeholder() {
        let channel = TextChannel::new(Box::new(SuppliedPolarity));
        let output = channel
            .run(&entries(json!([
                {"id": 1, "text": "Wow!", "polarity": 0.9},
                {"id": 2, "text": "fine", "polarity": 0.0}
            ])))
            .unwrap();

        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].pred, EmotionLabel::Surprised);
        assert_eq!(output.records[1].pred, EmotionLabel::Neutral);
        assert!(output.metrics.is_empty());
        assert_eq!(output.gold_count, 0);
    }

    #[test]
    fn test_run_scores_only_annotated_entries() {
        let channel = TextChannel::new(Box::new(SuppliedPolarity));
        let output = channel
            .run(&entries(json!([
                {"id": 1, "text": "so gross", "polarity": -0.9, "emotion": "Disgust"},
                {"id": 2, "text": "nice", "polarity": 0.4},
                {"id": 3, "text": "nice", "polarity": 0.4, "emotion": "Sad"}
            ])))
            .unwrap();

        assert_eq!(output.gold_count, 2);
        assert_eq!(output.metrics.value("Precision", "Disgust"), Some(100.0));
        assert_eq!(output.metrics.value("Recall", "Sad"), Some(0.0));
        // Happy was predicted once against a Sad gold
        assert_eq!(output.metrics.value("Precision", "Happy"), Some(0.0));
    }

    #[test]
    fn test_repeated_id_uses_last_prediction() {
        let channel = TextChannel::new(Box::new(SuppliedPolarity));
        let output = channel
            .run(&entries(json!([
                {"id": "x", "text": "ok", "polarity": 0.0, "emotion": "Happy"},
                {"id": "x", "text": "great", "polarity": 0.9}
            ])))
            .unwrap();

        assert_eq!(output.metrics.value("Recall", "Happy"), Some(100.0));
    }

    #[test]
    fn test_polarity_table_drives_classification() {
        let table = PolarityTable::from_scores([("1".to_string(), -0.4)]);
        let channel = TextChannel::new(Box::new(table));
        let record = channel.classify(&entries(json!([{"id": 1, "text": "what if it fails"}]))[0]);
        assert_eq!(record.polarity, -0.4);
        assert_eq!(record.pred, EmotionLabel::Fearful);
    }
}
