//! Move validation.

use super::{
    LanguageMode, MoveOutcome, RejectReason, UsedWords, Word, WordChainError, derive_key,
    has_continuation, normalize, starts_with_key,
};
use crate::lexicon::LexiconStore;
use tracing::{debug, info, instrument};

/// Decides whether `candidate` is a legal reply to `previous`.
///
/// Checks run in order and the first failure wins: blank input, already
/// used, not in the lexicon, wrong start. A missing (or blank) `previous`
/// makes any lexicon word a legal opening. For a legal move the terminal
/// flag reports whether the opponent is left without a continuation.
///
/// # Errors
///
/// Returns [`WordChainError::LexiconUnavailable`] if the store fails.
#[instrument(skip(store, used), fields(used = used.len()))]
pub fn validate_move<S: LexiconStore + ?Sized>(
    store: &S,
    candidate: &str,
    previous: Option<&str>,
    mode: LanguageMode,
    used: &UsedWords,
) -> Result<MoveOutcome, WordChainError> {
    let candidate = normalize(candidate);
    if candidate.is_empty() {
        return Ok(reject(RejectReason::EmptyInput));
    }

    if used.contains(&candidate) {
        return Ok(reject(RejectReason::AlreadyUsed));
    }

    if !store.exists_word(&Word::new(&candidate, mode))? {
        return Ok(reject(RejectReason::NotInLexicon));
    }

    let previous = previous.map(normalize).filter(|p| !p.is_empty());
    if let Some(previous) = previous {
        let required = derive_key(&previous, mode)?;
        if !starts_with_key(&candidate, &required, mode) {
            return Ok(reject(RejectReason::WrongStart(required)));
        }
    }

    let after = used.with(&candidate);
    let is_terminal = !has_continuation(store, &candidate, mode, &after)?;
    info!(word = %candidate, is_terminal, "Move accepted");
    Ok(MoveOutcome::Legal { is_terminal })
}

fn reject(reason: RejectReason) -> MoveOutcome {
    debug!(reason = reason.code(), "Move rejected");
    MoveOutcome::Illegal(reason)
}
