//! Polarity score coercion and the estimator seam
//!
//! Polarity comes from an external sentiment estimator. It reaches the rule
//! engine either inline on each text entry (`"polarity": 0.42` or
//! `"polarity": "0.42"`) or from an `id,polarity` CSV written by the
//! estimator. Anything that is not a finite number in [-1, 1] becomes 0.0
//! (neutral); malformed polarity is never an error.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::records::TextEntry;

/// Out-of-range or non-finite scores become 0.0
pub fn sanitize_polarity(p: f64) -> f64 {
    if p.is_finite() && (-1.0..=1.0).contains(&p) {
        p
    } else {
        debug!("Polarity {} outside [-1, 1], coercing to 0.0", p);
        0.0
    }
}

/// Coerce a textual polarity (`"0.5"`, `" -0.3 "`)
pub fn coerce_polarity_str(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(p) => sanitize_polarity(p),
        Err(_) => {
            debug!("Polarity '{}' is not numeric, coercing to 0.0", raw);
            0.0
        }
    }
}

/// Coerce a JSON polarity value (number or numeric string)
pub fn coerce_polarity_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(sanitize_polarity).unwrap_or(0.0),
        Value::String(s) => coerce_polarity_str(s),
        other => {
            debug!("Polarity {} is not numeric, coercing to 0.0", other);
            0.0
        }
    }
}

/// Source of polarity scores for text entries
pub trait PolarityEstimator {
    /// Polarity for one entry, already coerced into [-1, 1]
    fn polarity(&self, entry: &TextEntry) -> f64;
}

/// Uses the `polarity` field carried by each entry (0.0 when absent)
#[derive(Debug, Default, Clone, Copy)]
pub struct SuppliedPolarity;

impl PolarityEstimator for SuppliedPolarity {
    fn polarity(&self, entry: &TextEntry) -> f64 {
        entry
            .polarity
            .as_ref()
            .map(coerce_polarity_value)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Deserialize)]
struct PolarityRow {
    id: String,
    polarity: String,
}

/// Polarity scores precomputed by the external estimator, keyed by entry id
///
/// Entries missing from the table fall back to their inline polarity.
#[derive(Debug, Default, Clone)]
pub struct PolarityTable {
    scores: HashMap<String, f64>,
}

impl PolarityTable {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(id, p)| (id, sanitize_polarity(p)))
                .collect(),
        }
    }

    /// Load an `id,polarity` CSV; later rows override earlier ones
    pub fn load(path: &Path) -> vitexemo_common::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut scores = HashMap::new();
        for row in reader.deserialize() {
            let row: PolarityRow = row?;
            scores.insert(row.id, coerce_polarity_str(&row.polarity));
        }

        info!("Loaded {} polarity scores from {}", scores.len(), path.display());
        Ok(Self { scores })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl PolarityEstimator for PolarityTable {
    fn polarity(&self, entry: &TextEntry) -> f64 {
        match self.scores.get(&entry.id) {
            Some(p) => *p,
            None => SuppliedPolarity.polarity(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, polarity: Option<Value>) -> TextEntry {
        TextEntry {
            id: id.to_string(),
            text: Some("text".to_string()),
            emotion: None,
            polarity,
        }
    }

    #[test]
    fn test_sanitize_keeps_in_range_values() {
        assert_eq!(sanitize_polarity(-1.0), -1.0);
        assert_eq!(sanitize_polarity(1.0), 1.0);
        assert_eq!(sanitize_polarity(0.42), 0.42);
    }

    #[test]
    fn test_sanitize_coerces_out_of_range() {
        assert_eq!(sanitize_polarity(1.01), 0.0);
        assert_eq!(sanitize_polarity(f64::NAN), 0.0);
        assert_eq!(sanitize_polarity(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_coerce_json_values() {
        assert_eq!(coerce_polarity_value(&json!(0.7)), 0.7);
        assert_eq!(coerce_polarity_value(&json!("-0.25")), -0.25);
        assert_eq!(coerce_polarity_value(&json!("very")), 0.0);
        assert_eq!(coerce_polarity_value(&json!(null)), 0.0);
        assert_eq!(coerce_polarity_value(&json!([0.5])), 0.0);
    }

    #[test]
    fn test_supplied_polarity_defaults_to_neutral() {
        assert_eq!(SuppliedPolarity.polarity(&entry("1", None)), 0.0);
        assert_eq!(SuppliedPolarity.polarity(&entry("1", Some(json!(0.9)))), 0.9);
    }

    #[test]
    fn test_table_overrides_inline_polarity() {
        let table = PolarityTable::from_scores([("a".to_string(), -0.8)]);
        assert_eq!(table.polarity(&entry("a", Some(json!(0.9)))), -0.8);
        assert_eq!(table.polarity(&entry("b", Some(json!(0.9)))), 0.9);
    }

    #[test]
    fn test_load_table_from_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("polarity.csv");
        std::fs::write(&path, "id,polarity\n1,0.5\n2,abc\n1,0.25\n").unwrap();

        let table = PolarityTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.polarity(&entry("1", None)), 0.25);
        assert_eq!(table.polarity(&entry("2", None)), 0.0);
    }
}
