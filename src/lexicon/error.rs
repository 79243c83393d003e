//! Lexicon store error type.

use derive_more::{Display, Error};
use tracing::{error, instrument};

/// Lexicon query failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Lexicon error: {} at {}:{}", message, file, line)]
pub struct LexiconError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LexiconError {
    /// Creates a new lexicon error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Lexicon query failed");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<crate::db::DbError> for LexiconError {
    #[track_caller]
    fn from(err: crate::db::DbError) -> Self {
        Self::new(err.message)
    }
}
