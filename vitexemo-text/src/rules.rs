//! Polarity + cue rule engine
//!
//! Maps a sentiment polarity score and the raw text of one item to exactly
//! one emotion label. The polarity line is cut into five bands, checked in
//! order (first match wins):
//!
//! | Band | Range | Outcome |
//! |---|---|---|
//! | strong positive | `p >= 0.6` | Surprised if astonished, else Happy |
//! | moderate positive | `0.2 <= p < 0.6` | Mixed if a mixed cue, else Happy |
//! | neutral | `-0.2 < p < 0.2` | Neutral |
//! | moderate negative | `-0.6 < p <= -0.2` | Fearful if a fear cue or `?`, else Sad |
//! | strong negative | `p <= -0.6` | Disgust if a disgust cue, else Angry |
//!
//! Anything else (unreachable once the score is coerced) is Neutral.
//! The engine is total, deterministic and free of side effects.

use serde::Serialize;
use tracing::trace;
use vitexemo_common::EmotionLabel;

use crate::cues::{is_astonished, CueKind};
use crate::polarity::sanitize_polarity;

/// Polarity band that decided an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolarityBand {
    StrongPositive,
    ModeratePositive,
    Neutral,
    ModerateNegative,
    StrongNegative,
    Fallback,
}

impl PolarityBand {
    /// Classify an already-sanitized polarity
    ///
    /// Boundaries: 0.6 and 0.2 belong to the band above them; -0.2 and
    /// -0.6 belong to the band below them.
    pub fn of(p: f64) -> Self {
        if p >= 0.6 {
            PolarityBand::StrongPositive
        } else if (0.2..0.6).contains(&p) {
            PolarityBand::ModeratePositive
        } else if p > -0.2 && p < 0.2 {
            PolarityBand::Neutral
        } else if p > -0.6 && p <= -0.2 {
            PolarityBand::ModerateNegative
        } else if p <= -0.6 {
            PolarityBand::StrongNegative
        } else {
            PolarityBand::Fallback
        }
    }
}

/// Outcome of the rule engine for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDecision {
    pub label: EmotionLabel,
    pub band: PolarityBand,
    /// Cue signal that shaped the outcome, if any
    ///
    /// A Fearful outcome reached only through a `?` carries no cue.
    /// For the sad and angry defaults this records a matching sadness or
    /// anger cue when one is present, even though the label would be the
    /// same without it.
    pub cue: Option<CueKind>,
}

/// Run the rule engine and report how the label was reached
///
/// Out-of-range or non-finite polarity is treated as 0.0; missing text is
/// treated as empty.
pub fn decide(polarity: f64, text: Option<&str>) -> RuleDecision {
    let p = sanitize_polarity(polarity);
    let text = text.unwrap_or("");
    let band = PolarityBand::of(p);

    let (label, cue) = match band {
        PolarityBand::StrongPositive => {
            if is_astonished(text) {
                (EmotionLabel::Surprised, Some(CueKind::Astonishment))
            } else {
                (EmotionLabel::Happy, None)
            }
        }
        PolarityBand::ModeratePositive => {
            if CueKind::Mixed.matches(text) {
                (EmotionLabel::Mixed, Some(CueKind::Mixed))
            } else {
                (EmotionLabel::Happy, None)
            }
        }
        PolarityBand::Neutral => (EmotionLabel::Neutral, None),
        PolarityBand::ModerateNegative => {
            let fear = CueKind::Fear.matches(text);
            if fear || text.contains('?') {
                // A bare question mark is not a fear cue
                (EmotionLabel::Fearful, fear.then_some(CueKind::Fear))
            } else {
                let sad = CueKind::Sadness.matches(text).then_some(CueKind::Sadness);
                (EmotionLabel::Sad, sad)
            }
        }
        PolarityBand::StrongNegative => {
            if CueKind::Disgust.matches(text) {
                (EmotionLabel::Disgust, Some(CueKind::Disgust))
            } else {
                // Angry is the default strong-negative outcome with or without an anger cue
                let anger = CueKind::Anger.matches(text).then_some(CueKind::Anger);
                (EmotionLabel::Angry, anger)
            }
        }
        PolarityBand::Fallback => (EmotionLabel::Neutral, None),
    };

    trace!(polarity = p, ?band, ?label, ?cue, "rule decision");
    RuleDecision { label, band, cue }
}

/// Map polarity and text to an emotion label
pub fn map_polarity_to_emotion(polarity: f64, text: Option<&str>) -> EmotionLabel {
    decide(polarity, text).label
}
