//! Lexical cue tables
//!
//! Each cue set is a fixed list of lowercase substrings evidencing one
//! signal. Matching is plain substring containment on the lowercased text,
//! so `"but"` also fires inside `"button"`; the published results depend on
//! exactly this behavior.
//!
//! Astonishment is detected twice: by [`SURPRISE_PATTERN`] (word-bounded
//! interjections) and by the astonishment cue set. Callers OR both.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const FEAR_CUES: &[&str] = &["afraid", "scared", "fear", "worry", "worried", "what if"];

pub const DISGUST_CUES: &[&str] = &[
    "gross",
    "disgusting",
    "repulsive",
    "i can't stand",
    "cannot stand",
    "cant stand",
];

pub const ANGER_CUES: &[&str] = &[
    "hate", "stupid", "idiot", "damn", "destroy", "kill", "screw you", "idiots", "urgh",
];

pub const SAD_CUES: &[&str] = &["sad", "regret", "sorry", "lost", "depressed", "tear", "sorrow"];

pub const MIXED_CUES: &[&str] = &["but", "however", "although", "though"];

pub const ASTONISH_CUES: &[&str] = &[
    "wow",
    "unbelievable",
    "amazing",
    "incredible",
    "no way",
    "what a",
    "what an",
];

/// Case-insensitive, word-bounded interjections signalling surprise
pub static SURPRISE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(wow|unbelievable|incredible|no way|what a|what an|oh my|oh wow)\b")
        .expect("surprise regex must compile")
});

/// Semantic signal carried by a cue set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    Fear,
    Disgust,
    Anger,
    Sadness,
    Mixed,
    Astonishment,
}

impl CueKind {
    pub fn cues(&self) -> &'static [&'static str] {
        match self {
            CueKind::Fear => FEAR_CUES,
            CueKind::Disgust => DISGUST_CUES,
            CueKind::Anger => ANGER_CUES,
            CueKind::Sadness => SAD_CUES,
            CueKind::Mixed => MIXED_CUES,
            CueKind::Astonishment => ASTONISH_CUES,
        }
    }

    /// Does `text` contain any cue of this kind?
    pub fn matches(&self, text: &str) -> bool {
        contains_any(text, self.cues())
    }
}

/// Substring test of every cue against the lowercased text
pub fn contains_any(text: &str, cues: &[&str]) -> bool {
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    cues.iter().any(|cue| lowered.contains(cue))
}

/// Regex OR cue-set astonishment check
pub fn is_astonished(text: &str) -> bool {
    SURPRISE_PATTERN.is_match(text) || CueKind::Astonishment.matches(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any_is_case_insensitive() {
        assert!(contains_any("I am SO Scared", FEAR_CUES));
        assert!(!contains_any("I am calm", FEAR_CUES));
    }

    #[test]
    fn test_empty_text_matches_nothing() {
        for kind in [
            CueKind::Fear,
            CueKind::Disgust,
            CueKind::Anger,
            CueKind::Sadness,
            CueKind::Mixed,
            CueKind::Astonishment,
        ] {
            assert!(!kind.matches(""), "{:?} matched empty text", kind);
        }
        assert!(!is_astonished(""));
    }

    #[test]
    fn test_substring_matching_is_not_word_bounded() {
        // "but" inside "button" still counts
        assert!(CueKind::Mixed.matches("Press the button"));
    }

    #[test]
    fn test_surprise_pattern_is_word_bounded() {
        assert!(SURPRISE_PATTERN.is_match("Oh my, look at that"));
        assert!(SURPRISE_PATTERN.is_match("NO WAY!"));
        assert!(!SURPRISE_PATTERN.is_match("ohmy"));
    }

    #[test]
    fn test_astonishment_uses_regex_or_cues() {
        // "amazing" only appears in the cue set, "oh my" only in the regex
        assert!(!SURPRISE_PATTERN.is_match("That was amazing"));
        assert!(is_astonished("That was amazing"));
        assert!(!CueKind::Astonishment.matches("oh my goodness"));
        assert!(is_astonished("oh my goodness"));
    }

    #[test]
    fn test_apostrophe_cues() {
        assert!(CueKind::Disgust.matches("I can't stand this"));
        assert!(CueKind::Disgust.matches("i cant stand it"));
    }
}
