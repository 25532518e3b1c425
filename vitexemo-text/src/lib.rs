//! # ViTexEmo text channel
//!
//! Deterministic emotion prediction from free text:
//! - [`cues`]: static lexical cue tables and the surprise pattern
//! - [`rules`]: the polarity band + cue rule engine
//! - [`polarity`]: polarity coercion and the external estimator seam
//! - [`records`]: input entries and prediction records
//! - [`preprocess`]: whitespace normalization of input texts
//! - [`pipeline`]: the text channel pass (predict, align golds, score)

pub mod cues;
pub mod pipeline;
pub mod polarity;
pub mod preprocess;
pub mod records;
pub mod rules;

pub use pipeline::{TextChannel, TextChannelOutput};
pub use rules::{decide, map_polarity_to_emotion, PolarityBand, RuleDecision};
