//! Word chain game engine.
//!
//! Players alternately submit words that must start with the linking key of
//! the previous word, exist in the lexicon and not repeat within a session.
//! The side left without a continuation loses.

mod bot;
mod error;
mod key;
mod oracle;
mod orchestrator;
mod types;
mod validator;

pub use bot::{BotPolicy, select_bot_move};
pub use error::WordChainError;
pub use key::{derive_key, derive_start_key, starts_with_key};
pub use oracle::has_continuation;
pub use orchestrator::{
    BotMoveRequest, BotMoveResponse, CheckWordRequest, CheckWordResponse, ExchangeOutcome,
    TurnOrchestrator, WinReason,
};
pub use types::{
    BotResult, LanguageMode, LinkingKey, MoveOutcome, RejectReason, UsedWords, Word, normalize,
};
pub use validator::validate_move;
