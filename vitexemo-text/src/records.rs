//! Text channel input entries and prediction records

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;
use vitexemo_common::table_io::ensure_parent_dir;
use vitexemo_common::{EmotionLabel, Error, Result};

/// One entry of the input JSON array
///
/// ```json
/// {"id": 7, "text": "No way, we won!", "emotion": "Surprised", "polarity": 0.8}
/// ```
/// Only `id` is expected; every other field may be absent or null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextEntry {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub text: Option<String>,

    /// Gold label, when the dataset is annotated
    #[serde(default)]
    pub emotion: Option<String>,

    /// Inline polarity from the external estimator (number or numeric string)
    #[serde(default)]
    pub polarity: Option<Value>,
}

impl TextEntry {
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Gold label parsed against the taxonomy; `None` if absent or unknown
    pub fn gold(&self) -> Option<EmotionLabel> {
        self.emotion.as_deref().and_then(EmotionLabel::parse_lenient)
    }
}

/// Ids appear as JSON numbers or strings; both are kept as their text form
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Rule engine output for one text entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub text: String,
    pub polarity: f64,
    pub pred: EmotionLabel,
    pub gold: Option<EmotionLabel>,
}

/// Load the input JSON array of text entries
pub fn load_text_entries(path: &Path) -> Result<Vec<TextEntry>> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let entries: Vec<TextEntry> = serde_json::from_str(&content)?;
    info!("Loaded {} text entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Write predictions as `id,text,polarity,pred,gold` CSV
pub fn write_item_records(path: &Path, records: &[ItemRecord]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        writer.write_record(["id", "text", "polarity", "pred", "gold"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("Wrote {} text predictions to {}", records.len(), path.display());
    Ok(())
}
