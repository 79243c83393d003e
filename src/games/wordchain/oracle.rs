//! Continuation oracle: the checkmate test.

use super::{LanguageMode, UsedWords, WordChainError, derive_key};
use crate::lexicon::LexiconStore;
use tracing::{debug, instrument};

/// Returns true if some unused word can follow `last_word`.
///
/// A position is terminal ("checkmate") exactly when this is false for the
/// side about to move. `used` must already include `last_word`.
///
/// # Errors
///
/// Returns [`WordChainError::InvalidWord`] for a blank `last_word` and
/// [`WordChainError::LexiconUnavailable`] if the store fails.
#[instrument(skip(store, used), fields(used = used.len()))]
pub fn has_continuation<S: LexiconStore + ?Sized>(
    store: &S,
    last_word: &str,
    mode: LanguageMode,
    used: &UsedWords,
) -> Result<bool, WordChainError> {
    let key = derive_key(last_word, mode)?;
    let count = store.count_by_linking_key(&key, mode, used)?;
    debug!(key = %key, count, "Counted continuations");
    Ok(count > 0)
}
