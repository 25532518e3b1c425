//! Emotion taxonomy shared by every pipeline stage
//!
//! The study classifies every text item, image and fused pair into exactly
//! one of eight categories. The declaration order below is the column order
//! of every metrics table the pipeline writes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Emotion category
///
/// Serialized as the capitalized display name (`"Happy"`), which is also the
/// CSV cell format and the metrics table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmotionLabel {
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgust,
    Surprised,
    Neutral,
    Mixed,
}

impl EmotionLabel {
    /// All labels in metrics column order
    pub const ALL: [EmotionLabel; 8] = [
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Angry,
        EmotionLabel::Fearful,
        EmotionLabel::Disgust,
        EmotionLabel::Surprised,
        EmotionLabel::Neutral,
        EmotionLabel::Mixed,
    ];

    /// Canonical name, as written in prediction CSVs and table headers
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "Happy",
            EmotionLabel::Sad => "Sad",
            EmotionLabel::Angry => "Angry",
            EmotionLabel::Fearful => "Fearful",
            EmotionLabel::Disgust => "Disgust",
            EmotionLabel::Surprised => "Surprised",
            EmotionLabel::Neutral => "Neutral",
            EmotionLabel::Mixed => "Mixed",
        }
    }

    /// Position in [`EmotionLabel::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse a label cell, ignoring surrounding whitespace only
    ///
    /// Names are case-sensitive: `"happy"` is not `Happy`. Returns `None`
    /// for blank cells and for anything outside the taxonomy, so unknown
    /// labels become "missing" (never a match) instead of aborting a run.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        EmotionLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == trimmed)
    }
}

impl FromStr for EmotionLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionLabel::parse_lenient(s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown emotion label '{}'", s)))
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_declaration_order() {
        for (i, label) in EmotionLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i, "{:?} out of order", label);
        }
        assert_eq!(EmotionLabel::ALL.len(), 8);
    }

    #[test]
    fn test_parse_round_trips_display_names() {
        for label in EmotionLabel::ALL {
            assert_eq!(label.to_string().parse::<EmotionLabel>().unwrap(), label);
        }
    }

    #[test]
    fn test_parse_lenient_trims_whitespace_but_keeps_case() {
        assert_eq!(EmotionLabel::parse_lenient("  Happy "), Some(EmotionLabel::Happy));
        assert_eq!(EmotionLabel::parse_lenient("happy"), None);
        assert_eq!(EmotionLabel::parse_lenient("DISGUST"), None);
        assert_eq!(EmotionLabel::parse_lenient(""), None);
        assert_eq!(EmotionLabel::parse_lenient("Joyful"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "Bored".parse::<EmotionLabel>().unwrap_err();
        assert!(err.to_string().contains("Bored"));
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&EmotionLabel::Surprised).unwrap();
        assert_eq!(json, "\"Surprised\"");
        let back: EmotionLabel = serde_json::from_str("\"Mixed\"").unwrap();
        assert_eq!(back, EmotionLabel::Mixed);
    }
}
