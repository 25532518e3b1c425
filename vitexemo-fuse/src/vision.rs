//! Vision channel seam
//!
//! Image classification happens in an external model; this module owns the
//! parts around it: which images are classified and in what order, and the
//! `image,pred` CSV the vision scoring and fusion stages read. Ordering
//! matters because both pair the i-th image with the i-th text entry.
//!
//! The model's output reaches the pipeline as a [`ClassificationTable`]:
//! an `image,pred` CSV keyed by file name, in whatever order the model
//! wrote it. [`classify_image_dir`] re-orders it to the image listing order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use vitexemo_common::table_io::ensure_parent_dir;
use vitexemo_common::{EmotionLabel, Error, Result};

/// Image extensions picked up, in listing order
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// External image emotion classifier
pub trait ImageClassifier {
    fn classify(&self, image: &Path) -> Result<EmotionLabel>;
}

/// Vision channel output for one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionRecord {
    /// File name, without directory
    pub image: String,
    pub pred: EmotionLabel,
}

/// List images in `dir`: all `.png` files sorted, then `.jpg`, then `.jpeg`
///
/// Extension matching is case-sensitive and non-recursive.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(dir.display().to_string()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            entries.push(path);
        }
    }

    let mut images = Vec::new();
    for ext in IMAGE_EXTENSIONS {
        let mut group: Vec<PathBuf> = entries
            .iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(ext))
            .cloned()
            .collect();
        group.sort();
        images.extend(group);
    }

    if images.is_empty() {
        warn!("No images found in {}", dir.display());
    }
    Ok(images)
}

/// Classify every image in order
pub fn predict_images(
    classifier: &dyn ImageClassifier,
    images: &[PathBuf],
) -> Result<Vec<VisionRecord>> {
    images
        .iter()
        .map(|path| {
            let pred = classifier.classify(path)?;
            let image = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(VisionRecord { image, pred })
        })
        .collect()
}

/// Labels produced by the external image model, keyed by image file name
#[derive(Debug, Default, Clone)]
pub struct ClassificationTable {
    labels: HashMap<String, EmotionLabel>,
}

impl ClassificationTable {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = (String, EmotionLabel)>,
    {
        Self {
            labels: labels.into_iter().collect(),
        }
    }

    /// Load an `image,pred` CSV; later rows override earlier ones
    ///
    /// Labels must be exact taxonomy names; anything else is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut labels = HashMap::new();
        for (line_num, row) in reader.deserialize().enumerate() {
            let row: VisionRecord = row.map_err(|e| {
                Error::Malformed(format!("{} line {}: {}", path.display(), line_num + 2, e))
            })?;
            labels.insert(row.image, row.pred);
        }

        info!("Loaded {} image classifications from {}", labels.len(), path.display());
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl ImageClassifier for ClassificationTable {
    fn classify(&self, image: &Path) -> Result<EmotionLabel> {
        let name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.labels
            .get(&name)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("no classification for image '{}'", name)))
    }
}

/// List, classify and write the vision predictions for one image directory
pub fn classify_image_dir(
    image_dir: &Path,
    classifier: &dyn ImageClassifier,
    out_preds: &Path,
) -> Result<Vec<VisionRecord>> {
    let images = list_images(image_dir)?;
    let records = predict_images(classifier, &images)?;
    write_vision_predictions(out_preds, &records)?;
    Ok(records)
}

/// Write vision predictions as `image,pred` CSV
pub fn write_vision_predictions(path: &Path, records: &[VisionRecord]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        writer.write_record(["image", "pred"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("Wrote {} vision predictions to {}", records.len(), path.display());
    Ok(())
}
