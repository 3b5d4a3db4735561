//! Bounded fuzzy (edit-distance) search over the trie.
//!
//! Complements exact prefix completion: when the typed input matches nothing,
//! a bounded walk of the trie surfaces words within a small Levenshtein
//! distance of the input. The walk is iterative with an explicit stack and is
//! pruned by accumulated length, which caps the work at the nodes of depth
//! `target_len + max_distance` instead of alphabet^depth.

use crate::candidate::WordSuggestion;
use crate::trie::Trie;

/// Classic dynamic-programming Levenshtein distance.
///
/// Insertions, deletions and substitutions all cost 1. O(n*m) time with a
/// two-row table.
pub fn levenshtein(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len() as u32;
    }
    if b.is_empty() {
        return a.len() as u32;
    }

    let mut prev: Vec<u32> = (0..=b.len() as u32).collect();
    let mut cur = vec![0u32; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        cur[0] = i as u32 + 1;
        for (j, &cb) in b.iter().enumerate() {
            let sub = if ca == cb { prev[j] } else { prev[j] + 1 };
            cur[j + 1] = sub.min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Walk the trie and collect words within `max_distance` of `target`.
///
/// Confidence is `1 - distance / max_distance`. Results are sorted by
/// (distance ascending, frequency descending, word ascending); the caller
/// filters against words it already has.
pub fn search(trie: &Trie, target: &str, max_distance: u32) -> Vec<WordSuggestion> {
    let target_len = target.chars().count();
    let depth_bound = target_len + max_distance as usize;
    let mut out = Vec::new();

    let mut stack = vec![(trie.root(), String::new(), 0usize)];
    while let Some((node, prefix, depth)) = stack.pop() {
        if trie.is_terminal(node) {
            let distance = levenshtein(&prefix, target);
            if distance <= max_distance {
                let confidence = if max_distance == 0 {
                    1.0
                } else {
                    1.0 - distance as f32 / max_distance as f32
                };
                out.push(WordSuggestion::new(
                    prefix.clone(),
                    trie.frequency_at(node),
                    confidence,
                    distance,
                ));
            }
        }
        // Anything longer than target + bound cannot recover a distance
        // within bound.
        if depth >= depth_bound {
            continue;
        }
        for &(ch, child) in trie.children(node).iter().rev() {
            let mut next = prefix.clone();
            next.push(ch);
            stack.push((child, next, depth + 1));
        }
    }

    out.sort_by(|a, b| {
        a.edit_distance
            .cmp(&b.edit_distance)
            .then(b.frequency.cmp(&a.frequency))
            .then(a.word.cmp(&b.word))
    });
    out
}
