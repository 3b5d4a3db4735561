//! Suggestion types shared by the dictionary queries and the swipe decoder.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A ranked word suggestion.
///
/// `confidence` is a relative quality in `[0, 1]`; `edit_distance` is 0 for
/// exact prefix matches and beam-decoded words, and the Levenshtein distance
/// for fuzzy corrections. Two suggestions are equal when their words match
/// case-insensitively, regardless of score, so deduplication across producers
/// works on word identity alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSuggestion {
    pub word: String,
    pub frequency: u32,
    pub confidence: f32,
    pub edit_distance: u32,
}

impl WordSuggestion {
    pub fn new<W: Into<String>>(word: W, frequency: u32, confidence: f32, edit_distance: u32) -> Self {
        Self {
            word: word.into(),
            frequency,
            confidence,
            edit_distance,
        }
    }

    /// A suggestion for an exact or beam match (distance 0, full confidence).
    pub fn exact<W: Into<String>>(word: W, frequency: u32) -> Self {
        Self::new(word, frequency, 1.0, 0)
    }

    /// Case-insensitive identity key used for deduplication.
    pub fn key(&self) -> String {
        self.word.to_lowercase()
    }
}

impl PartialEq for WordSuggestion {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for WordSuggestion {}

impl Hash for WordSuggestion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_case_insensitive_and_score_blind() {
        let a = WordSuggestion::new("Hello", 100, 0.9, 0);
        let b = WordSuggestion::new("hello", 5, 0.1, 2);
        let c = WordSuggestion::exact("hero", 10);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn exact_suggestion_defaults() {
        let s = WordSuggestion::exact("hello", 42);
        assert_eq!(s.frequency, 42);
        assert_eq!(s.edit_distance, 0);
        assert!((s.confidence - 1.0).abs() < f32::EPSILON);
    }
}
