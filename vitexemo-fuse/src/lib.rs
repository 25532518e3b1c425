//! # ViTexEmo fusion and evaluation
//!
//! - [`predictions`]: loading per-channel prediction CSVs
//! - [`vision`]: the external image classifier seam
//! - [`fusion`]: text-over-vision fusion policy
//! - [`pipeline`]: score the vision stream, fuse two channels and score
//!   the fused stream

pub mod fusion;
pub mod pipeline;
pub mod predictions;
pub mod vision;

pub use fusion::{fuse_labels, fuse_pair, FusedRecord};
pub use pipeline::{
    evaluate_fusion, evaluate_vision, run_fusion_files, run_vision_files, FusionOutput,
    VisionOutput,
};
pub use predictions::{load_predictions, PredictionRow, PredictionTable};
pub use vision::{classify_image_dir, ClassificationTable, ImageClassifier, VisionRecord};
