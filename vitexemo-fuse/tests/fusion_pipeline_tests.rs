//! Integration tests for the fusion pass over files
//!
//! Tests cover:
//! - Text predictions with golds fused against vision predictions
//! - Fused CSV and overall metrics artifacts on disk
//! - Missing inputs

use std::fs;
use tempfile::TempDir;
use vitexemo_common::table_io::read_metrics_table;
use vitexemo_common::EmotionLabel;
use vitexemo_fuse::run_fusion_files;

const TEXT_PREDS: &str = "\
id,text,polarity,pred,gold
1,Wow!,0.9,Surprised,Surprised
2,meh,0.0,Neutral,Sad
3,so gross,-0.8,Disgust,Disgust
4,extra,0.1,Neutral,Neutral
";

const VISION_PREDS: &str = "\
image,pred
1.png,Happy
2.png,Sad
3.png,Disgust
";

#[test]
fn test_fusion_writes_fused_and_overall_metrics() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("text_predictions.csv");
    let vision = dir.path().join("visual_predictions.csv");
    fs::write(&text, TEXT_PREDS).unwrap();
    fs::write(&vision, VISION_PREDS).unwrap();

    let out_metrics = dir.path().join("results").join("overall_metrics.csv");
    let out_fused = dir.path().join("results").join("fused_predictions.csv");

    let output = run_fusion_files(&text, &vision, &out_metrics, &out_fused).unwrap();
    assert_eq!(output.fused.len(), 3);
    assert_eq!(output.dropped, 1);

    let fused_csv = fs::read_to_string(&out_fused).unwrap();
    assert_eq!(
        fused_csv,
        "index,text_pred,vision_pred,fused\n\
         0,Surprised,Happy,Surprised\n\
         1,Neutral,Sad,Neutral\n\
         2,Disgust,Disgust,Disgust\n"
    );

    let table = read_metrics_table(&out_metrics).unwrap();
    assert_eq!(table, output.metrics);
    assert_eq!(table.value("F1 Score", "Surprised"), Some(100.0));
    assert_eq!(table.value("Recall", "Sad"), Some(0.0));
    assert_eq!(table.value("Precision", "Neutral"), Some(0.0));
    assert_eq!(table.columns().len(), EmotionLabel::ALL.len());
}

#[test]
fn test_missing_vision_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("text_predictions.csv");
    fs::write(&text, TEXT_PREDS).unwrap();

    let result = run_fusion_files(
        &text,
        &dir.path().join("visual_predictions.csv"),
        &dir.path().join("overall_metrics.csv"),
        &dir.path().join("fused_predictions.csv"),
    );
    assert!(result.is_err());
    assert!(!dir.path().join("fused_predictions.csv").exists());
}

#[test]
fn test_empty_vision_file_yields_empty_fusion() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("text_predictions.csv");
    let vision = dir.path().join("visual_predictions.csv");
    fs::write(&text, TEXT_PREDS).unwrap();
    fs::write(&vision, "").unwrap();

    let out_metrics = dir.path().join("overall_metrics.csv");
    let out_fused = dir.path().join("fused_predictions.csv");
    let output = run_fusion_files(&text, &vision, &out_metrics, &out_fused).unwrap();

    assert!(output.fused.is_empty());
    assert_eq!(output.dropped, 4);
    // Golds exist but nothing was paired: every cell scores zero
    let table = read_metrics_table(&out_metrics).unwrap();
    assert!(table.rows().iter().all(|r| r.values.iter().all(|v| *v == 0.0)));
    assert_eq!(
        fs::read_to_string(&out_fused).unwrap(),
        "index,text_pred,vision_pred,fused\n"
    );
}

#[test]
fn test_text_predictions_without_golds_give_placeholder_overall() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("text_predictions.csv");
    let vision = dir.path().join("visual_predictions.csv");
    fs::write(&text, "id,text,polarity,pred,gold\n1,hi,0.9,Happy,\n2,meh,0.0,Neutral,\n").unwrap();
    fs::write(&vision, "image,pred\n1.png,Happy\n2.png,Sad\n").unwrap();

    let out_metrics = dir.path().join("overall_metrics.csv");
    let out_fused = dir.path().join("fused_predictions.csv");
    let output = run_fusion_files(&text, &vision, &out_metrics, &out_fused).unwrap();

    assert_eq!(output.fused.len(), 2);
    assert!(output.metrics.is_empty());
    assert_eq!(fs::read_to_string(&out_metrics).unwrap(), "");
}
