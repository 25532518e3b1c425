//! Per-class precision / recall / F1 scoring
//!
//! Scores aligned gold and predicted label sequences one-vs-rest for every
//! label in a fixed ordering and packs the result into a [`MetricsTable`]:
//! one row per metric (`Precision`, `Recall`, `F1 Score`), one column per
//! label, values in percent rounded to 2 decimals.
//!
//! # Zero division
//! A label with no predicted instances has precision 0; a label with no
//! true instances has recall 0; F1 is 0 whenever both are 0. Scoring never
//! produces NaN.
//!
//! # Unknown labels
//! Sequences hold `Option<EmotionLabel>`. `None` (a blank cell or a label
//! outside the taxonomy) never matches anything: a `None` gold only adds a
//! false positive for the predicted label, a `None` prediction only adds a
//! false negative for the gold label.

use serde::Serialize;
use tracing::debug;

use crate::{EmotionLabel, Error, Result};

/// Row labels of a metrics table, in order
pub const METRIC_NAMES: [&str; 3] = ["Precision", "Recall", "F1 Score"];

/// Header of the row-label column in metrics CSVs
pub const METRIC_COLUMN: &str = "Metric";

/// One metric row (e.g. `Precision`) with one value per table column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: String,
    pub values: Vec<f64>,
}

/// Metrics table: named columns, named rows, numeric cells
///
/// Column names are free-form so that baseline tables written by other
/// tools load unchanged; tables produced by [`score`] use the label names.
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MetricsTable {
    columns: Vec<String>,
    rows: Vec<MetricRow>,
}

impl MetricsTable {
    /// Build a table, checking that every row has one value per column
    pub fn new(columns: Vec<String>, rows: Vec<MetricRow>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|r| r.values.len() != columns.len()) {
            return Err(Error::Malformed(format!(
                "metric row '{}' has {} values but the table has {} columns",
                row.metric,
                row.values.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Placeholder table written when no gold labels are available
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Value column names (without the leading `Metric` column)
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Full CSV header: `Metric` followed by the value columns
    ///
    /// Empty for the placeholder table.
    pub fn header(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        std::iter::once(METRIC_COLUMN.to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    /// All values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// Single cell lookup by metric row name and column name
    pub fn value(&self, metric: &str, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.metric == metric)
            .map(|r| r.values[idx])
    }
}

/// One-vs-rest confusion counts for a single label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ClassCounts {
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall, computed from counts
    pub fn f1(&self) -> f64 {
        ratio(
            2 * self.true_positives,
            2 * self.true_positives + self.false_positives + self.false_negatives,
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Scale a ratio to percent, rounded to 2 decimals
fn to_percent(ratio: f64) -> f64 {
    (ratio * 100.0 * 100.0).round() / 100.0
}

/// Count true/false positives and false negatives for each label in `labels`
pub fn count_per_class(
    gold: &[Option<EmotionLabel>],
    predicted: &[Option<EmotionLabel>],
    labels: &[EmotionLabel],
) -> Result<Vec<ClassCounts>> {
    if gold.len() != predicted.len() {
        return Err(Error::InvalidInput(format!(
            "gold and predicted sequences differ in length ({} vs {})",
            gold.len(),
            predicted.len()
        )));
    }

    let slot = |label: EmotionLabel| labels.iter().position(|l| *l == label);
    let mut counts = vec![ClassCounts::default(); labels.len()];

    for (g, p) in gold.iter().zip(predicted) {
        match (g, p) {
            (Some(g), Some(p)) if g == p => {
                if let Some(i) = slot(*g) {
                    counts[i].true_positives += 1;
                }
            }
            _ => {
                if let Some(i) = p.and_then(slot) {
                    counts[i].false_positives += 1;
                }
                if let Some(i) = g.and_then(slot) {
                    counts[i].false_negatives += 1;
                }
            }
        }
    }

    Ok(counts)
}

/// Score aligned sequences against an explicit label ordering
pub fn score_with_labels(
    gold: &[Option<EmotionLabel>],
    predicted: &[Option<EmotionLabel>],
    labels: &[EmotionLabel],
) -> Result<MetricsTable> {
    let counts = count_per_class(gold, predicted, labels)?;

    let precision = counts.iter().map(|c| to_percent(c.precision())).collect();
    let recall = counts.iter().map(|c| to_percent(c.recall())).collect();
    let f1 = counts.iter().map(|c| to_percent(c.f1())).collect();

    debug!(
        "Scored {} items across {} labels",
        gold.len(),
        labels.len()
    );

    MetricsTable::new(
        labels.iter().map(|l| l.as_str().to_string()).collect(),
        vec![
            MetricRow { metric: METRIC_NAMES[0].to_string(), values: precision },
            MetricRow { metric: METRIC_NAMES[1].to_string(), values: recall },
            MetricRow { metric: METRIC_NAMES[2].to_string(), values: f1 },
        ],
    )
}

/// Score aligned sequences over the full taxonomy in column order
pub fn score(
    gold: &[Option<EmotionLabel>],
    predicted: &[Option<EmotionLabel>],
) -> Result<MetricsTable> {
    score_with_labels(gold, predicted, &EmotionLabel::ALL)
}
