//! Lexicon store query contract and the in-memory implementation.

mod error;
mod memory;

pub use error::LexiconError;
pub use memory::MemoryLexicon;

use crate::games::wordchain::{LanguageMode, LinkingKey, UsedWords, Word};
use rand::RngCore;

/// Read-only queries the word chain engine makes against a lexicon.
///
/// Entries are indexed by the key they *start* with (see
/// [`derive_start_key`](crate::derive_start_key)); "matching a linking key"
/// below means the entry's start key equals that key and the entry is a
/// legal reply under [`starts_with_key`](crate::starts_with_key). In primary
/// mode that excludes one-token entries, which never carry a following token.
pub trait LexiconStore {
    /// Returns true if the word exists in its mode's partition.
    fn exists_word(&self, word: &Word) -> Result<bool, LexiconError>;

    /// Counts entries of `mode` matching `key` that are not in `excluding`.
    fn count_by_linking_key(
        &self,
        key: &LinkingKey,
        mode: LanguageMode,
        excluding: &UsedWords,
    ) -> Result<u64, LexiconError>;

    /// Draws one entry uniformly from those of `mode` matching `key` (any
    /// entry when `key` is `None`) that are not in `excluding`.
    ///
    /// Returns `None` when nothing qualifies.
    fn sample_random(
        &self,
        mode: LanguageMode,
        key: Option<&LinkingKey>,
        excluding: &UsedWords,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Word>, LexiconError>;
}

impl<S: LexiconStore + ?Sized> LexiconStore for &S {
    fn exists_word(&self, word: &Word) -> Result<bool, LexiconError> {
        (**self).exists_word(word)
    }

    fn count_by_linking_key(
        &self,
        key: &LinkingKey,
        mode: LanguageMode,
        excluding: &UsedWords,
    ) -> Result<u64, LexiconError> {
        (**self).count_by_linking_key(key, mode, excluding)
    }

    fn sample_random(
        &self,
        mode: LanguageMode,
        key: Option<&LinkingKey>,
        excluding: &UsedWords,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Word>, LexiconError> {
        (**self).sample_random(mode, key, excluding, rng)
    }
}
