//! Typed-input suggestion engine.
//!
//! Combines the immutable dictionary, the learned-word store and the ranker
//! into the surface the IME layer calls for ordinary key-by-key typing:
//! prefix completion plus fuzzy correction, with learned words mixed in and
//! results cached per input string.

use crate::candidate::WordSuggestion;
use crate::dictionary::Dictionary;
use crate::ranker;
use crate::userdict::UserDict;
use crate::Config;
use lru::LruCache;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use tracing::debug;

/// Suggestion engine for typed input.
///
/// Queries take `&self`; the only interior mutability is the LRU result
/// cache, so a cleared or missed cache never changes what a query returns.
pub struct Engine {
    dict: Dictionary,
    userdict: UserDict,
    config: Config,
    cache: RefCell<LruCache<String, Vec<WordSuggestion>>>,
}

impl Engine {
    pub fn new(dict: Dictionary, userdict: UserDict, config: Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size)
            .unwrap_or(NonZeroUsize::new(256).expect("nonzero"));
        Self {
            dict,
            userdict,
            config,
            cache: RefCell::new(LruCache::new(capacity)),
        }
    }

    /// Ranked suggestions for the current typed input.
    ///
    /// Dictionary prefix matches and fuzzy corrections are merged with
    /// learned words sharing the prefix; the merged list is deduplicated and
    /// truncated to the configured suggestion limit.
    pub fn suggest(&self, input: &str) -> Vec<WordSuggestion> {
        if let Some(cached) = self.cache.borrow_mut().get(input) {
            return cached.clone();
        }

        let limit = self.config.suggestion_limit;
        let from_dict = self
            .dict
            .suggestions(input, limit, self.config.max_edit_distance);
        let learned: Vec<WordSuggestion> = self
            .userdict
            .words_with_prefix(input)
            .into_iter()
            .map(|(word, count)| WordSuggestion::exact(word, count))
            .collect();
        debug!(
            input,
            dict = from_dict.len(),
            learned = learned.len(),
            "typed suggestions"
        );

        let merged = ranker::merge([from_dict, learned], limit);
        self.cache
            .borrow_mut()
            .put(input.to_string(), merged.clone());
        merged
    }

    /// Record that the user committed `word`, boosting it in future ranking.
    pub fn commit(&self, word: &str) {
        self.userdict.learn(word);
        self.clear_cache();
    }

    /// Teach the dictionary a new word with an explicit frequency.
    pub fn insert(&mut self, word: &str, frequency: u32) {
        self.dict.insert(word, frequency);
        self.clear_cache();
    }

    pub fn contains(&self, word: &str) -> bool {
        self.dict.contains(word)
    }

    /// The immutable dictionary, for the swipe decoder to traverse.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }
}
