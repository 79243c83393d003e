//! In-memory lexicon, used by tests and the console game.

use super::{LexiconError, LexiconStore};
use crate::games::wordchain::{
    LanguageMode, LinkingKey, UsedWords, Word, derive_start_key, starts_with_key,
};
use rand::RngCore;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
struct Entry {
    word: Word,
    start_key: LinkingKey,
}

/// Lexicon held in memory, in insertion order.
///
/// Text is unique across both partitions, as in the SQLite store.
#[derive(Debug, Clone, Default)]
pub struct MemoryLexicon {
    entries: Vec<Entry>,
    texts: HashSet<String>,
}

impl MemoryLexicon {
    /// Creates an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every word in `words` to the `mode` partition.
    pub fn with_words<'a>(mut self, mode: LanguageMode, words: impl IntoIterator<Item = &'a str>) -> Self {
        for word in words {
            self.insert(word, mode);
        }
        self
    }

    /// Inserts a word. Returns false if it is blank or its text already exists.
    #[instrument(skip(self))]
    pub fn insert(&mut self, text: &str, mode: LanguageMode) -> bool {
        let word = Word::new(text, mode);
        let Ok(start_key) = derive_start_key(word.text(), mode) else {
            debug!("Skipping blank word");
            return false;
        };
        if !self.texts.insert(word.text().clone()) {
            debug!(text = %word, "Word already present");
            return false;
        }
        self.entries.push(Entry { word, start_key });
        true
    }

    /// Removes a word by text. Returns true if it was present.
    pub fn remove(&mut self, text: &str) -> bool {
        let text = crate::games::wordchain::normalize(text);
        if !self.texts.remove(&text) {
            return false;
        }
        self.entries.retain(|e| *e.word.text() != text);
        true
    }

    /// Number of entries across both partitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the lexicon holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn matching<'a>(
        &'a self,
        mode: LanguageMode,
        key: Option<&'a LinkingKey>,
        excluding: &'a UsedWords,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| {
            *e.word.mode() == mode
                && key.is_none_or(|k| e.start_key == *k && starts_with_key(e.word.text(), k, mode))
                && !excluding.contains(e.word.text())
        })
    }
}

impl LexiconStore for MemoryLexicon {
    fn exists_word(&self, word: &Word) -> Result<bool, LexiconError> {
        Ok(self.entries.iter().any(|e| e.word == *word))
    }

    fn count_by_linking_key(
        &self,
        key: &LinkingKey,
        mode: LanguageMode,
        excluding: &UsedWords,
    ) -> Result<u64, LexiconError> {
        Ok(self.matching(mode, Some(key), excluding).count() as u64)
    }

    fn sample_random(
        &self,
        mode: LanguageMode,
        key: Option<&LinkingKey>,
        excluding: &UsedWords,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Word>, LexiconError> {
        let candidates: Vec<&Entry> = self.matching(mode, key, excluding).collect();
        Ok(candidates.choose(rng).map(|e| e.word.clone()))
    }
}
