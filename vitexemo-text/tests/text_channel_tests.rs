//! Integration tests for the text channel pass
//!
//! Tests cover:
//! - One entry per emotion band, end to end through the files
//! - Placeholder metrics when the dataset has no annotations
//! - External polarity CSV overriding inline scores

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use vitexemo_common::table_io::read_metrics_table;
use vitexemo_common::{EmotionLabel, METRIC_NAMES};
use vitexemo_text::polarity::{PolarityTable, SuppliedPolarity};
use vitexemo_text::TextChannel;

const ANNOTATED: &str = r#"[
  {"id": 1, "text": "Wow, I did not expect that!", "polarity": 0.8, "emotion": "Surprised"},
  {"id": 2, "text": "What a lovely morning", "polarity": 0.7, "emotion": "Happy"},
  {"id": 3, "text": "Nice, but a bit slow", "polarity": 0.3, "emotion": "Mixed"},
  {"id": 4, "text": "Pass the salt", "polarity": 0.0, "emotion": "Neutral"},
  {"id": 5, "text": "What if they never call?", "polarity": -0.4, "emotion": "Fearful"},
  {"id": 6, "text": "I miss the old house", "polarity": -0.3, "emotion": "Sad"},
  {"id": 7, "text": "That smell is disgusting", "polarity": -0.8, "emotion": "Disgust"},
  {"id": 8, "text": "I will destroy you!", "polarity": -0.9, "emotion": "Angry"}
]"#;

struct Fixture {
    _dir: TempDir,
    input: PathBuf,
    metrics: PathBuf,
    preds: PathBuf,
}

fn fixture(json: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data").join("sample_texts.json");
    fs::create_dir_all(input.parent().unwrap()).unwrap();
    fs::write(&input, json).unwrap();
    let metrics = dir.path().join("results").join("textual_metrics.csv");
    let preds = dir.path().join("results").join("text_predictions.csv");
    Fixture { _dir: dir, input, metrics, preds }
}

#[test]
fn test_every_band_is_predicted_and_scored() {
    let fx = fixture(ANNOTATED);
    let channel = TextChannel::new(Box::new(SuppliedPolarity));
    let output = channel.run_files(&fx.input, &fx.metrics, &fx.preds).unwrap();

    let preds: Vec<EmotionLabel> = output.records.iter().map(|r| r.pred).collect();
    assert_eq!(
        preds,
        vec![
            EmotionLabel::Surprised,
            // "What a" is an interjection, so strong positive reads as surprise
            EmotionLabel::Surprised,
            EmotionLabel::Mixed,
            EmotionLabel::Neutral,
            EmotionLabel::Fearful,
            EmotionLabel::Sad,
            EmotionLabel::Disgust,
            EmotionLabel::Angry,
        ]
    );

    let table = read_metrics_table(&fx.metrics).unwrap();
    assert_eq!(table, output.metrics);
    assert_eq!(table.value("Recall", "Happy"), Some(0.0));
    assert_eq!(table.value("Precision", "Surprised"), Some(50.0));
    assert_eq!(table.value("F1 Score", "Surprised"), Some(66.67));
    for label in ["Mixed", "Neutral", "Fearful", "Sad", "Disgust", "Angry"] {
        for metric in METRIC_NAMES {
            assert_eq!(table.value(metric, label), Some(100.0), "{} {}", metric, label);
        }
    }

    let csv = fs::read_to_string(&fx.preds).unwrap();
    assert!(csv.starts_with("id,text,polarity,pred,gold\n"));
    assert_eq!(csv.lines().count(), 9);
}

#[test]
fn test_unannotated_input_writes_placeholder_metrics() {
    let fx = fixture(r#"[{"id": 1, "text": "hello"}, {"id": 2, "text": null, "polarity": "oops"}]"#);
    let channel = TextChannel::new(Box::new(SuppliedPolarity));
    let output = channel.run_files(&fx.input, &fx.metrics, &fx.preds).unwrap();

    assert!(output.records.iter().all(|r| r.pred == EmotionLabel::Neutral));
    assert_eq!(fs::read_to_string(&fx.metrics).unwrap(), "");
    assert!(read_metrics_table(&fx.metrics).unwrap().is_empty());
}

#[test]
fn test_polarity_csv_overrides_inline_scores() {
    let fx = fixture(r#"[{"id": "a", "text": "so gross", "polarity": 0.9}]"#);
    let polarity_csv = fx.input.with_file_name("polarity.csv");
    fs::write(&polarity_csv, "id,polarity\na,-0.75\n").unwrap();

    let table = PolarityTable::load(&polarity_csv).unwrap();
    let channel = TextChannel::new(Box::new(table));
    let output = channel.run_files(&fx.input, &fx.metrics, &fx.preds).unwrap();

    assert_eq!(output.records[0].polarity, -0.75);
    assert_eq!(output.records[0].pred, EmotionLabel::Disgust);
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let channel = TextChannel::new(Box::new(SuppliedPolarity));
    let result = channel.run_files(
        &dir.path().join("absent.json"),
        &dir.path().join("m.csv"),
        &dir.path().join("p.csv"),
    );
    assert!(result.is_err());
}
