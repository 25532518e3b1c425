//! Text-over-vision fusion policy
//!
//! Channels are paired **by position**: the i-th text prediction with the
//! i-th vision prediction. Nothing checks that the two streams describe the
//! same items, so callers must produce both in the same item order. Items
//! past the end of the shorter stream are dropped.
//!
//! Per pair: equal labels pass through; on disagreement the text label wins
//! when present, otherwise the vision label is used.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use vitexemo_common::table_io::ensure_parent_dir;
use vitexemo_common::{EmotionLabel, Result};

/// One fused pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusedRecord {
    pub index: usize,
    pub text_pred: Option<EmotionLabel>,
    pub vision_pred: Option<EmotionLabel>,
    /// Missing only when both channel labels are missing
    pub fused: Option<EmotionLabel>,
}

/// Fuse one pair of channel labels
pub fn fuse_pair<T: PartialEq + Clone>(text: Option<&T>, vision: Option<&T>) -> Option<T> {
    if text == vision {
        return text.cloned();
    }
    text.or(vision).cloned()
}

/// Fuse two positionally aligned prediction streams
pub fn fuse_labels(
    text: &[Option<EmotionLabel>],
    vision: &[Option<EmotionLabel>],
) -> Vec<FusedRecord> {
    text.iter()
        .zip(vision)
        .enumerate()
        .map(|(index, (t, v))| FusedRecord {
            index,
            text_pred: *t,
            vision_pred: *v,
            fused: fuse_pair(t.as_ref(), v.as_ref()),
        })
        .collect()
}

/// Write fused records as `index,text_pred,vision_pred,fused` CSV
pub fn write_fused_records(path: &Path, records: &[FusedRecord]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        writer.write_record(["index", "text_pred", "vision_pred", "fused"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("Wrote {} fused predictions to {}", records.len(), path.display());
    Ok(())
}
