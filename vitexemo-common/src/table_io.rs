//! Metrics table CSV reading and writing
//!
//! File format:
//! ```text
//! Metric,Happy,Sad,...
//! Precision,80.0,66.67,...
//! Recall,...
//! F1 Score,...
//! ```
//! A stage that has no gold labels writes an empty file as a placeholder so
//! that downstream stages (and the verifier) always find the artifact. An
//! empty or blank file reads back as [`MetricsTable::empty`].

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::metrics::{MetricRow, MetricsTable, METRIC_COLUMN};
use crate::{Error, Result};

/// Create the parent directory of `path` if it does not exist yet
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Format one numeric cell
///
/// Always carries a fractional part (`80.0`, `66.67`), matching the way the
/// published baseline tables were written.
pub fn format_cell(value: f64) -> String {
    format!("{:?}", value)
}

/// Parse a metrics table from any CSV source
pub fn parse_metrics_table<R: Read>(mut reader: R) -> Result<MetricsTable> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    if content.trim().is_empty() {
        debug!("Metrics CSV is blank, treating as placeholder table");
        return Ok(MetricsTable::empty());
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();
    for record in csv_reader.records() {
        records.push(record?);
    }

    if headers.iter().all(|h| h.is_empty()) && records.is_empty() {
        debug!("Metrics CSV has no columns, treating as placeholder table");
        return Ok(MetricsTable::empty());
    }

    match headers.get(0) {
        Some(first) if first == METRIC_COLUMN => {}
        other => {
            return Err(Error::Malformed(format!(
                "first column must be '{}', found '{}'",
                METRIC_COLUMN,
                other.unwrap_or("")
            )))
        }
    }

    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    let mut rows = Vec::with_capacity(records.len());

    for (line_num, record) in records.iter().enumerate() {
        let metric = record.get(0).unwrap_or("").to_string();
        let mut values = Vec::with_capacity(columns.len());
        for (col, cell) in columns.iter().zip(record.iter().skip(1)) {
            let value = cell.parse::<f64>().map_err(|_| {
                Error::Malformed(format!(
                    "non-numeric value '{}' in column '{}' at line {}",
                    cell,
                    col,
                    line_num + 2
                ))
            })?;
            values.push(value);
        }
        rows.push(MetricRow { metric, values });
    }

    MetricsTable::new(columns, rows)
}

/// Read a metrics table from a CSV file
pub fn read_metrics_table(path: &Path) -> Result<MetricsTable> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let file = fs::File::open(path)?;
    parse_metrics_table(file)
}

/// Write a metrics table as CSV, creating parent directories as needed
///
/// The placeholder table produces an empty file.
pub fn write_metrics_table(path: &Path, table: &MetricsTable) -> Result<()> {
    ensure_parent_dir(path)?;

    if table.is_empty() {
        fs::write(path, "")?;
        debug!("Wrote placeholder metrics file {}", path.display());
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.header())?;
    for row in table.rows() {
        let record: Vec<String> = std::iter::once(row.metric.clone())
            .chain(row.values.iter().map(|v| format_cell(*v)))
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    debug!(
        "Wrote metrics table {} ({} columns)",
        path.display(),
        table.columns().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{score, EmotionLabel};
    use tempfile::TempDir;

    const BASELINE: &str = "\
Metric,Happy,Sad
Precision,80.0,66.67
Recall,75.5,0.0
F1 Score,77.68,0.0
";

    #[test]
    fn test_parse_baseline_table() {
        let table = parse_metrics_table(BASELINE.as_bytes()).unwrap();
        assert_eq!(table.columns(), &["Happy".to_string(), "Sad".to_string()]);
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.value("Recall", "Happy"), Some(75.5));
        assert_eq!(table.value("F1 Score", "Sad"), Some(0.0));
    }

    #[test]
    fn test_blank_file_is_placeholder() {
        assert!(parse_metrics_table("".as_bytes()).unwrap().is_empty());
        assert!(parse_metrics_table("\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_cell_is_malformed() {
        let csv = "Metric,Happy\nPrecision,high\n";
        let err = parse_metrics_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
        assert!(err.to_string().contains("Happy"));
    }

    #[test]
    fn test_missing_metric_column_is_malformed() {
        let err = parse_metrics_table("Happy,Sad\n1.0,2.0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_write_then_read_scored_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results").join("textual_metrics.csv");

        let gold = [Some(EmotionLabel::Happy), Some(EmotionLabel::Sad), Some(EmotionLabel::Sad)];
        let pred = [Some(EmotionLabel::Happy), Some(EmotionLabel::Happy), Some(EmotionLabel::Sad)];
        let table = score(&gold, &pred).unwrap();

        write_metrics_table(&path, &table).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Metric,Happy,Sad,Angry,Fearful,Disgust,Surprised,Neutral,Mixed"));
        assert!(contents.contains("Precision,50.0,100.0,0.0"));

        assert_eq!(read_metrics_table(&path).unwrap(), table);
    }

    #[test]
    fn test_placeholder_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("visual_metrics.csv");
        write_metrics_table(&path, &MetricsTable::empty()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(read_metrics_table(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read_metrics_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
