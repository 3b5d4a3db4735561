//! Frequency-weighted word dictionary.
//!
//! One `Dictionary` per active language: built once from an asset, read-only
//! afterwards, dropped wholesale on language switch. The query surface is
//! `&self` throughout, so concurrent lookups from worker threads need no
//! locking.

use crate::asset;
use crate::candidate::WordSuggestion;
use crate::fuzzy;
use crate::trie::{NodeId, Trie};
use crate::utils::normalize_word;
use ahash::AHashSet;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Word store with exact, prefix and fuzzy lookup.
///
/// # Example
/// ```
/// use libpredict_core::Dictionary;
///
/// let mut dict = Dictionary::new();
/// dict.insert("Hello", 100);
///
/// assert!(dict.contains("hello"));
/// let matches = dict.words_with_prefix("he", 5);
/// assert_eq!(matches[0].word, "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    trie: Trie,
}

impl Dictionary {
    pub fn new() -> Self {
        Self { trie: Trie::new() }
    }

    /// Build a dictionary from `(word, frequency)` pairs.
    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = (W, u32)>,
        W: AsRef<str>,
    {
        let mut dict = Self::new();
        for (word, freq) in words {
            dict.insert(word.as_ref(), freq);
        }
        dict
    }

    /// Load from a plain word-list asset (`<word> [freq]` lines).
    pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("open word list {}", path.display()))?;
        let dict = Self::from_words(asset::parse_word_list(&text));
        info!(
            words = dict.word_count(),
            nodes = dict.trie.node_count(),
            path = %path.display(),
            "loaded word list"
        );
        Ok(dict)
    }

    /// Load from a packed binary trie asset.
    ///
    /// A missing or corrupt asset returns an error and leaves no partial
    /// state behind; the caller keeps its previous (or empty) dictionary and
    /// degrades to no suggestions.
    pub fn load_packed<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("open dictionary asset {}", path.display()))?;
        let words = asset::read_packed(&bytes)
            .with_context(|| format!("corrupt dictionary asset {}", path.display()))?;
        let dict = Self::from_words(words);
        info!(
            words = dict.word_count(),
            nodes = dict.trie.node_count(),
            path = %path.display(),
            "loaded packed dictionary"
        );
        Ok(dict)
    }

    /// Load from a bincode snapshot asset.
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("open snapshot {}", path.display()))?;
        let words = asset::read_snapshot(&bytes)
            .with_context(|| format!("corrupt snapshot {}", path.display()))?;
        let dict = Self::from_words(words);
        info!(words = dict.word_count(), path = %path.display(), "loaded snapshot");
        Ok(dict)
    }

    /// Write the current contents as a bincode snapshot.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let words = self.trie.collect_words(self.trie.root(), "");
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("create snapshot {}", path.display()))?;
        asset::write_snapshot(&words, &mut file)
    }

    /// Insert a word, lowercasing it first. Overwrites the frequency of an
    /// existing word; empty words are ignored.
    pub fn insert(&mut self, word: &str, frequency: u32) {
        let word = normalize_word(word);
        self.trie.insert(&word, frequency);
    }

    /// True iff the normalized word is present as a complete word.
    pub fn contains(&self, word: &str) -> bool {
        self.trie.contains(&normalize_word(word))
    }

    /// Frequency of the normalized word, 0 if absent.
    pub fn frequency(&self, word: &str) -> u32 {
        self.trie.frequency(&normalize_word(word))
    }

    /// All words starting with `prefix`, sorted by frequency descending and
    /// alphabetically on ties, truncated to `limit`.
    ///
    /// An empty or unknown prefix yields an empty result.
    pub fn words_with_prefix(&self, prefix: &str, limit: usize) -> Vec<WordSuggestion> {
        let prefix = normalize_word(prefix);
        if prefix.is_empty() || limit == 0 {
            return Vec::new();
        }
        let Some(node) = self.trie.node_for(&prefix) else {
            return Vec::new();
        };
        let mut words = self.trie.collect_words(node, &prefix);
        words.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        words.truncate(limit);
        words
            .into_iter()
            .map(|(word, freq)| WordSuggestion::exact(word, freq))
            .collect()
    }

    /// Prefix completions first, then fuzzy corrections within
    /// `max_edit_distance` to fill up to `limit`.
    ///
    /// Fuzzy candidates are deduplicated against the prefix matches and
    /// ordered by (edit distance ascending, frequency descending).
    pub fn suggestions(
        &self,
        input: &str,
        limit: usize,
        max_edit_distance: u32,
    ) -> Vec<WordSuggestion> {
        let input = normalize_word(input);
        if input.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut out = self.words_with_prefix(&input, limit);
        if out.len() < limit {
            let seen: AHashSet<String> = out.iter().map(|s| s.key()).collect();
            let corrections = fuzzy::search(&self.trie, &input, max_edit_distance);
            debug!(
                input = %input,
                prefix_matches = out.len(),
                corrections = corrections.len(),
                "fuzzy fill"
            );
            for suggestion in corrections {
                if out.len() >= limit {
                    break;
                }
                if !seen.contains(&suggestion.key()) {
                    out.push(suggestion);
                }
            }
        }
        out.truncate(limit);
        out
    }

    /// Graph traversal: outgoing edges of a node, sorted by character.
    pub fn children(&self, node: NodeId) -> &[(char, NodeId)] {
        self.trie.children(node)
    }

    /// Graph traversal: frequency stored at a node (0 when non-terminal).
    pub fn frequency_at(&self, node: NodeId) -> u32 {
        self.trie.frequency_at(node)
    }

    /// Whether a node ends a word.
    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.trie.is_terminal(node)
    }

    /// The trie root, the decoder's starting hypothesis position.
    pub fn root(&self) -> NodeId {
        self.trie.root()
    }

    pub fn word_count(&self) -> usize {
        self.trie.word_count()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.word_count() == 0
    }

    /// Drop all words; the dictionary returns to its empty state.
    pub fn clear(&mut self) {
        self.trie.clear();
    }
}
