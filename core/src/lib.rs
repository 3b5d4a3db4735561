//! libpredict-core
//!
//! Dictionary store, fuzzy correction and suggestion ranking shared by the
//! typed-input engine and the swipe decoder crate.
//!
//! The dictionary is an arena-backed trie built once per language from an
//! asset (word list, packed binary trie, or bincode snapshot), read-only
//! afterwards, and swapped wholesale on language switch. Everything on the
//! query surface is a pure function of the input and the loaded dictionary.
//!
//! Public API:
//! - `Dictionary` - frequency-weighted word trie with exact/prefix/fuzzy lookup
//! - `WordSuggestion` - ranked suggestion with confidence and edit distance
//! - `Engine` - typed-input suggestion engine with learned-word mixing
//! - `UserDict` - on-device learning store (in-memory or redb)
//! - `ranker::merge` - dedup and rank candidate lists from any producer
//! - `Config` - tunables for suggestion, correction and swipe decoding

use serde::{Deserialize, Serialize};

pub mod trie;
pub use trie::{NodeId, Trie};

pub mod candidate;
pub use candidate::WordSuggestion;

pub mod fuzzy;
pub use fuzzy::levenshtein;

pub mod asset;
pub use asset::WordEntry;

pub mod dictionary;
pub use dictionary::Dictionary;

pub mod ranker;

pub mod userdict;
pub use userdict::{InMemoryUserDict, UserDict};

pub mod engine;
pub use engine::Engine;

/// Tunables for suggestion generation and swipe decoding.
///
/// Deserializable from TOML so a keyboard build can ship adjusted constants
/// without recompiling. The swipe-related fields feed the decoder in the
/// `libswipe` crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Maximum hypotheses kept alive after each beam-search step.
    pub beam_width: usize,

    /// Gaussian falloff width for spatial key scoring, in normalized layout
    /// units.
    pub gaussian_sigma: f32,

    /// Score cost for a hypothesis that does not consume a letter at a
    /// gesture point. Lower values make corner-cutting easier, higher values
    /// favor paths that touch every key.
    pub wait_penalty: f32,

    /// Maximum Levenshtein distance for fuzzy typed-input correction.
    pub max_edit_distance: u32,

    /// Keep every Nth raw touch sample when normalizing a gesture path.
    pub downsample_step: usize,

    /// Maximum suggestions returned to the caller.
    pub suggestion_limit: usize,

    /// Maximum entries in the typed-input result cache.
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            beam_width: 25,
            gaussian_sigma: 0.12,
            wait_penalty: 0.5,
            max_edit_distance: 2,
            downsample_step: 2,
            suggestion_limit: 10,
            max_cache_size: 256,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize a word for storage and lookup: NFC, trimmed, lowercased.
    pub fn normalize_word(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_lowercase()
    }
}

pub use utils::normalize_word;
