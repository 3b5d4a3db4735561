//! Merging and ranking of candidate lists from different producers.
//!
//! Typed input produces prefix/fuzzy suggestions from the dictionary; swipe
//! input produces beam-decoded suggestions. Whichever ran, the caller hands
//! the lists here to get one deduplicated, ranked suggestion strip.

use crate::candidate::WordSuggestion;
use ahash::AHashMap;

/// Merge candidate lists into a single ranked list.
///
/// Duplicates (case-insensitive word identity) keep the occurrence with the
/// higher confidence, then higher frequency. The merged list is sorted by
/// confidence descending, frequency descending, word ascending, and truncated
/// to `limit`.
pub fn merge<I>(lists: I, limit: usize) -> Vec<WordSuggestion>
where
    I: IntoIterator<Item = Vec<WordSuggestion>>,
{
    let mut best: AHashMap<String, WordSuggestion> = AHashMap::new();
    for list in lists {
        for suggestion in list {
            match best.get(&suggestion.key()) {
                Some(existing) if !beats(&suggestion, existing) => {}
                _ => {
                    best.insert(suggestion.key(), suggestion);
                }
            }
        }
    }

    let mut merged: Vec<WordSuggestion> = best.into_values().collect();
    merged.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.frequency.cmp(&a.frequency))
            .then(a.word.cmp(&b.word))
    });
    merged.truncate(limit);
    merged
}

fn beats(challenger: &WordSuggestion, incumbent: &WordSuggestion) -> bool {
    match challenger.confidence.partial_cmp(&incumbent.confidence) {
        Some(std::cmp::Ordering::Greater) => true,
        Some(std::cmp::Ordering::Equal) => challenger.frequency > incumbent.frequency,
        _ => false,
    }
}
