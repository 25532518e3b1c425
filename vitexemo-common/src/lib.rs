//! # ViTexEmo Common Library
//!
//! Shared code for all ViTexEmo pipeline stages including:
//! - Emotion taxonomy (the fixed 8-label set)
//! - Per-class metrics scoring and the metrics table type
//! - Metrics table CSV reading and writing
//! - Configuration loading
//! - Logging initialization

pub mod config;
pub mod emotion;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod table_io;

pub use emotion::EmotionLabel;
pub use error::{Error, Result};
pub use metrics::{score, score_with_labels, MetricRow, MetricsTable, METRIC_NAMES};
