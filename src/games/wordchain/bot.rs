//! Bot move selection.

use super::{BotResult, LanguageMode, UsedWords, Word, WordChainError, derive_key, has_continuation};
use crate::lexicon::LexiconStore;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// How the bot picks among qualifying words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BotPolicy {
    /// Play one uniformly sampled word. Costs one sample and one count query.
    #[default]
    Uniform,
    /// Sample up to `samples` words and play the first one that leaves the
    /// player without a continuation, falling back to the first sample.
    SeekCheckmate {
        /// Maximum number of candidates examined per turn.
        samples: usize,
    },
}

impl BotPolicy {
    /// Builds a policy from a sample budget; one sample means uniform play.
    pub fn from_samples(samples: usize) -> Self {
        if samples <= 1 {
            Self::Uniform
        } else {
            Self::SeekCheckmate { samples }
        }
    }

    fn samples(&self) -> usize {
        match self {
            Self::Uniform => 1,
            Self::SeekCheckmate { samples } => (*samples).max(1),
        }
    }
}

/// Chooses the bot's reply to `previous`.
///
/// With no previous word the bot opens with any word of the partition.
/// Otherwise it draws from unused words starting with the previous word's
/// linking key. An empty candidate set means the bot resigns.
///
/// # Errors
///
/// Returns [`WordChainError::LexiconUnavailable`] if the store fails.
#[instrument(skip(store, used, rng), fields(used = used.len()))]
pub fn select_bot_move<S: LexiconStore + ?Sized>(
    store: &S,
    previous: Option<&str>,
    mode: LanguageMode,
    used: &UsedWords,
    policy: BotPolicy,
    rng: &mut dyn RngCore,
) -> Result<BotResult, WordChainError> {
    let key = match previous.map(str::trim).filter(|p| !p.is_empty()) {
        Some(previous) => Some(derive_key(previous, mode)?),
        None => None,
    };

    let mut fallback: Option<Word> = None;
    for attempt in 0..policy.samples() {
        let Some(word) = store.sample_random(mode, key.as_ref(), used, rng)? else {
            break;
        };

        let after = used.with(word.text());
        let is_terminal = !has_continuation(store, word.text(), mode, &after)?;
        debug!(attempt, word = %word, is_terminal, "Examined candidate");

        if is_terminal || policy == BotPolicy::Uniform {
            info!(word = %word, is_terminal, "Bot played");
            return Ok(BotResult::Played { word, is_terminal });
        }
        fallback.get_or_insert(word);
    }

    match fallback {
        Some(word) => {
            info!(word = %word, "Bot played without forcing a win");
            Ok(BotResult::Played {
                word,
                is_terminal: false,
            })
        }
        None => {
            info!(key = ?key, "No word available, bot resigns");
            Ok(BotResult::NoWordAvailable)
        }
    }
}
