//! Text normalization ahead of polarity estimation
//!
//! The external estimator is run over the normalized CSV this stage writes;
//! the rule engine itself reads the raw entries.

use serde::Serialize;
use std::path::Path;
use tracing::info;
use vitexemo_common::table_io::ensure_parent_dir;
use vitexemo_common::Result;

use crate::records::{load_text_entries, TextEntry};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreprocessedText {
    pub id: String,
    pub text: String,
}

/// Trim and collapse every whitespace run into a single space
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn preprocess_entries(entries: &[TextEntry]) -> Vec<PreprocessedText> {
    entries
        .iter()
        .map(|e| PreprocessedText {
            id: e.id.clone(),
            text: normalize_text(e.text_or_empty()),
        })
        .collect()
}

/// Normalize the input JSON texts into an `id,text` CSV
///
/// Returns the number of rows written.
pub fn preprocess_texts(input_json: &Path, out_csv: &Path) -> Result<usize> {
    let entries = load_text_entries(input_json)?;
    let rows = preprocess_entries(&entries);

    ensure_parent_dir(out_csv)?;
    let mut writer = csv::Writer::from_path(out_csv)?;
    if rows.is_empty() {
        writer.write_record(["id", "text"])?;
    }
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Saved {} preprocessed texts to {}", rows.len(), out_csv.display());
    Ok(rows.len())
}
