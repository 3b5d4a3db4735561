//! On-device learning of words the user actually commits.
//!
//! The main dictionary is immutable after language load, so words the user
//! teaches the keyboard live here: an in-memory map for tests and ephemeral
//! profiles, or a `redb`-backed store that survives restarts. Learned words
//! are surfaced by the engine as extra suggestion candidates.

use crate::utils::normalize_word;
use redb::ReadableTable;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory learned-word store.
#[derive(Clone, Debug, Default)]
pub struct InMemoryUserDict {
    inner: Arc<RwLock<HashMap<String, u32>>>,
}

impl InMemoryUserDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more use of `word`.
    pub fn learn(&self, word: &str) {
        self.learn_with_count(word, 1);
    }

    /// Record `delta` uses of `word`.
    pub fn learn_with_count(&self, word: &str, delta: u32) {
        let word = normalize_word(word);
        if word.is_empty() || delta == 0 {
            return;
        }
        if let Ok(mut map) = self.inner.write() {
            let entry = map.entry(word).or_insert(0);
            *entry = entry.saturating_add(delta);
        }
    }

    /// How many times `word` has been committed.
    pub fn count(&self, word: &str) -> u32 {
        let word = normalize_word(word);
        self.inner
            .read()
            .map(|map| map.get(&word).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Learned words starting with `prefix`, with their counts.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<(String, u32)> {
        let prefix = normalize_word(prefix);
        let Ok(map) = self.inner.read() else {
            return Vec::new();
        };
        let mut out: Vec<(String, u32)> = map
            .iter()
            .filter(|(word, _)| word.starts_with(&prefix))
            .map(|(word, count)| (word.clone(), *count))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        out
    }

    /// Copy out the full contents.
    pub fn snapshot(&self) -> HashMap<String, u32> {
        self.inner.read().map(|map| map.clone()).unwrap_or_default()
    }

    /// Forget everything.
    pub fn clear(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.clear();
        }
    }
}

/// Backend switch for the learned-word store.
#[derive(Clone, Debug)]
pub enum UserDict {
    InMemory(InMemoryUserDict),
    Redb(RedbUserDict),
}

impl UserDict {
    pub fn new_in_memory() -> Self {
        UserDict::InMemory(InMemoryUserDict::new())
    }

    /// Open or create a persistent store at `path`.
    pub fn new_redb<P: AsRef<std::path::Path>>(path: P) -> Result<Self, redb::Error> {
        Ok(UserDict::Redb(RedbUserDict::new(path)?))
    }

    pub fn learn(&self, word: &str) {
        match self {
            UserDict::InMemory(m) => m.learn(word),
            UserDict::Redb(r) => {
                let _ = r.learn(word);
            }
        }
    }

    pub fn learn_with_count(&self, word: &str, delta: u32) {
        match self {
            UserDict::InMemory(m) => m.learn_with_count(word, delta),
            UserDict::Redb(r) => {
                let _ = r.learn_with_count(word, delta);
            }
        }
    }

    pub fn count(&self, word: &str) -> u32 {
        match self {
            UserDict::InMemory(m) => m.count(word),
            UserDict::Redb(r) => r.count(word).unwrap_or(0),
        }
    }

    pub fn words_with_prefix(&self, prefix: &str) -> Vec<(String, u32)> {
        match self {
            UserDict::InMemory(m) => m.words_with_prefix(prefix),
            UserDict::Redb(r) => r.words_with_prefix(prefix).unwrap_or_default(),
        }
    }

    pub fn snapshot(&self) -> HashMap<String, u32> {
        match self {
            UserDict::InMemory(m) => m.snapshot(),
            UserDict::Redb(r) => r.snapshot().unwrap_or_default(),
        }
    }

    pub fn clear(&self) {
        match self {
            UserDict::InMemory(m) => m.clear(),
            UserDict::Redb(r) => {
                let _ = r.clear();
            }
        }
    }
}

/// Persistent learned-word store backed by `redb`.
#[derive(Clone)]
pub struct RedbUserDict {
    db: Arc<redb::Database>,
}

impl std::fmt::Debug for RedbUserDict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbUserDict").finish_non_exhaustive()
    }
}

impl RedbUserDict {
    const TABLE: redb::TableDefinition<'static, &'static str, u32> =
        redb::TableDefinition::new("learned_words");

    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Result<Self, redb::Error> {
        if let Some(parent) = path.as_ref().parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let db = redb::Database::create(path.as_ref())?;
        Ok(Self { db: Arc::new(db) })
    }

    pub fn learn(&self, word: &str) -> Result<(), redb::Error> {
        self.learn_with_count(word, 1)
    }

    pub fn learn_with_count(&self, word: &str, delta: u32) -> Result<(), redb::Error> {
        let word = normalize_word(word);
        if word.is_empty() || delta == 0 {
            return Ok(());
        }
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(Self::TABLE)?;
            let current = table.get(word.as_str())?.map(|v| v.value()).unwrap_or(0);
            table.insert(word.as_str(), current.saturating_add(delta))?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn count(&self, word: &str) -> Result<u32, redb::Error> {
        let word = normalize_word(word);
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(Self::TABLE) {
            Ok(table) => table,
            // First read before any write: the table does not exist yet.
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        Ok(table.get(word.as_str())?.map(|v| v.value()).unwrap_or(0))
    }

    pub fn words_with_prefix(&self, prefix: &str) -> Result<Vec<(String, u32)>, redb::Error> {
        let prefix = normalize_word(prefix);
        let mut out = Vec::new();
        for (word, count) in self.iter_all()? {
            if word.starts_with(&prefix) {
                out.push((word, count));
            }
        }
        out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(out)
    }

    pub fn snapshot(&self) -> Result<HashMap<String, u32>, redb::Error> {
        Ok(self.iter_all()?.into_iter().collect())
    }

    pub fn clear(&self) -> Result<(), redb::Error> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(Self::TABLE)?;
            table.retain(|_, _| false)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn iter_all(&self) -> Result<Vec<(String, u32)>, redb::Error> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(Self::TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut out = Vec::new();
        for item in table.iter()? {
            let (k, v) = item?;
            out.push((k.value().to_string(), v.value()));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learn_accumulates_counts() {
        let dict = InMemoryUserDict::new();
        assert_eq!(dict.count("yeet"), 0);
        dict.learn("yeet");
        dict.learn("Yeet");
        assert_eq!(dict.count("yeet"), 2);
    }

    #[test]
    fn prefix_query_sorted_by_count() {
        let dict = InMemoryUserDict::new();
        dict.learn_with_count("yeet", 5);
        dict.learn_with_count("yes", 2);
        dict.learn_with_count("no", 9);

        let words = dict.words_with_prefix("ye");
        assert_eq!(
            words,
            vec![("yeet".to_string(), 5), ("yes".to_string(), 2)]
        );
    }

    #[test]
    fn empty_word_is_ignored() {
        let dict = InMemoryUserDict::new();
        dict.learn("");
        assert!(dict.snapshot().is_empty());
    }

    #[test]
    fn clear_forgets_everything() {
        let dict = UserDict::new_in_memory();
        dict.learn("yeet");
        dict.clear();
        assert_eq!(dict.count("yeet"), 0);
    }
}
