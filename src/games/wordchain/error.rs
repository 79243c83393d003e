//! Failures of the word chain engine.
//!
//! Rejected moves are not errors: they come back as
//! [`MoveOutcome::Illegal`](super::MoveOutcome::Illegal). These variants
//! cover the cases where no verdict could be reached at all.

use crate::lexicon::LexiconError;

/// Error returned when the engine cannot produce an outcome.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum WordChainError {
    /// A linking key was requested for an empty word.
    #[display("Cannot derive a linking key from an empty word")]
    InvalidWord,

    /// The lexicon store failed to answer a query.
    #[display("Lexicon unavailable: {}", _0)]
    #[from]
    LexiconUnavailable(LexiconError),
}

impl std::error::Error for WordChainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidWord => None,
            Self::LexiconUnavailable(e) => Some(e),
        }
    }
}
