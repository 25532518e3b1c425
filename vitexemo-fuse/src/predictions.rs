//! Per-channel prediction CSV loading
//!
//! Both channels write a CSV with at least a `pred` column. The text
//! channel's file may also carry gold labels in a `gold` column (or, for
//! files produced by older tooling, `emotion`). Any other columns are
//! ignored. Cells outside the emotion taxonomy load as missing.

use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};
use vitexemo_common::{EmotionLabel, Error, Result};

/// Gold label column names, in preference order
pub const GOLD_COLUMNS: [&str; 2] = ["gold", "emotion"];

#[derive(Debug, Deserialize)]
struct RawPredictionRow {
    #[serde(default)]
    pred: Option<String>,
    #[serde(default)]
    gold: Option<String>,
    #[serde(default)]
    emotion: Option<String>,
}

/// One channel prediction, with its gold label when the file has one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionRow {
    pub pred: Option<EmotionLabel>,
    pub gold: Option<EmotionLabel>,
}

/// A loaded prediction file, rows in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionTable {
    pub rows: Vec<PredictionRow>,
    /// Which gold column the file carried, if any
    pub gold_column: Option<&'static str>,
    /// Non-blank cells in the gold column
    pub gold_cells: usize,
}

impl PredictionTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Predicted labels in row order
    pub fn labels(&self) -> Vec<Option<EmotionLabel>> {
        self.rows.iter().map(|r| r.pred).collect()
    }

    /// Gold labels in row order
    ///
    /// `None` when the file has no gold column or the column is blank in
    /// every row (the text channel always writes the column).
    pub fn golds(&self) -> Option<Vec<Option<EmotionLabel>>> {
        self.gold_column?;
        if self.gold_cells == 0 {
            return None;
        }
        Some(self.rows.iter().map(|r| r.gold).collect())
    }
}

fn parse_label(cell: Option<&str>, unknown: &mut usize) -> Option<EmotionLabel> {
    let cell = cell?.trim();
    if cell.is_empty() {
        return None;
    }
    let label = EmotionLabel::parse_lenient(cell);
    if label.is_none() {
        *unknown += 1;
    }
    label
}

/// Parse a prediction CSV from any source
pub fn parse_predictions<R: Read>(mut reader: R) -> Result<PredictionTable> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    if content.trim().is_empty() {
        return Ok(PredictionTable::default());
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = csv_reader.headers()?.clone();
    if !headers.iter().any(|h| h == "pred") {
        return Err(Error::Malformed(
            "prediction file has no 'pred' column".to_string(),
        ));
    }
    let gold_column = GOLD_COLUMNS
        .iter()
        .copied()
        .find(|name| headers.iter().any(|h| h == *name));

    let mut unknown = 0;
    let mut gold_cells = 0;
    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let raw: RawPredictionRow = result
            .map_err(|e| Error::Malformed(format!("line {}: {}", line_num + 2, e)))?;
        let gold_cell = match gold_column {
            Some("gold") => raw.gold.as_deref(),
            Some(_) => raw.emotion.as_deref(),
            None => None,
        };
        if gold_cell.is_some_and(|c| !c.trim().is_empty()) {
            gold_cells += 1;
        }
        rows.push(PredictionRow {
            pred: parse_label(raw.pred.as_deref(), &mut unknown),
            gold: parse_label(gold_cell, &mut unknown),
        });
    }

    if unknown > 0 {
        warn!("{} labels outside the emotion taxonomy treated as missing", unknown);
    }
    debug!("Parsed {} prediction rows (gold column: {:?})", rows.len(), gold_column);

    Ok(PredictionTable {
        rows,
        gold_column,
        gold_cells,
    })
}

/// Load a prediction CSV file
pub fn load_predictions(path: &Path) -> Result<PredictionTable> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    parse_predictions(fs::File::open(path)?)
}
