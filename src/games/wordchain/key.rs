//! Linking-key derivation.

use super::{LanguageMode, LinkingKey, WordChainError, normalize};
use tracing::instrument;

/// Derives the key the next word must begin with.
///
/// Secondary words link through their last character, primary words through
/// their last space-delimited token. The input is normalized first.
///
/// # Errors
///
/// Returns [`WordChainError::InvalidWord`] if the word is blank.
#[instrument(level = "trace")]
pub fn derive_key(word: &str, mode: LanguageMode) -> Result<LinkingKey, WordChainError> {
    let word = normalize(word);
    let key = match mode {
        LanguageMode::Secondary => word.chars().last().map(String::from),
        LanguageMode::Primary => word
            .split(' ')
            .filter(|segment| !segment.is_empty())
            .next_back()
            .map(str::to_string),
    };
    key.map(LinkingKey::from).ok_or(WordChainError::InvalidWord)
}

/// Derives the key a word begins with.
///
/// This is the value the lexicon indexes entries by: a word `w` can follow
/// `prev` exactly when `derive_start_key(w) == derive_key(prev)`.
///
/// # Errors
///
/// Returns [`WordChainError::InvalidWord`] if the word is blank.
#[instrument(level = "trace")]
pub fn derive_start_key(word: &str, mode: LanguageMode) -> Result<LinkingKey, WordChainError> {
    let word = normalize(word);
    let key = match mode {
        LanguageMode::Secondary => word.chars().next().map(String::from),
        LanguageMode::Primary => word
            .split(' ')
            .find(|segment| !segment.is_empty())
            .map(str::to_string),
    };
    key.map(LinkingKey::from).ok_or(WordChainError::InvalidWord)
}

/// Returns true if `word` may follow a word whose linking key is `key`.
///
/// Secondary chains only need a shared leading character. Primary chains
/// need the key as a whole leading token followed by a space.
pub fn starts_with_key(word: &str, key: &LinkingKey, mode: LanguageMode) -> bool {
    match mode {
        LanguageMode::Secondary => word.starts_with(key.as_str()),
        LanguageMode::Primary => word
            .strip_prefix(key.as_str())
            .is_some_and(|rest| rest.starts_with(' ')),
    }
}
