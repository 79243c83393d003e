//! Word Chain library - word-chaining game engine with a bot opponent
//!
//! Players alternately submit words that must begin with the linking key of
//! the previous word, exist in the lexicon and not repeat within a session.
//! The side left without a continuation loses.
//!
//! # Architecture
//!
//! - **Engine**: linking keys, move validation, the continuation oracle,
//!   bot move selection and turn orchestration. Stateless; the caller
//!   supplies the session on every call.
//! - **Lexicon**: the [`LexiconStore`] query contract, with an in-memory
//!   store and a SQLite-backed [`LexiconRepository`].
//! - **Seed**: bulk import of word lists.
//! - **Server**: REST API over the engine and the dictionary.
//!
//! # Example
//!
//! ```
//! use word_chain::{LanguageMode, MemoryLexicon, MoveOutcome, UsedWords, validate_move};
//!
//! let lexicon = MemoryLexicon::new()
//!     .with_words(LanguageMode::Secondary, ["cat", "tiger", "rat"]);
//! let used: UsedWords = ["cat"].into_iter().collect();
//!
//! let outcome = validate_move(&lexicon, "tiger", Some("cat"), LanguageMode::Secondary, &used)?;
//! assert_eq!(outcome, MoveOutcome::Legal { is_terminal: false });
//! # Ok::<(), word_chain::WordChainError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod db;
mod games;
mod lexicon;
mod seed;
mod server;

// Crate-level exports - Word chain engine
pub use games::wordchain::{
    BotMoveRequest, BotMoveResponse, BotPolicy, BotResult, CheckWordRequest, CheckWordResponse,
    ExchangeOutcome, LanguageMode, LinkingKey, MoveOutcome, RejectReason, TurnOrchestrator,
    UsedWords, WinReason, Word, WordChainError, derive_key, derive_start_key, has_continuation,
    normalize, select_bot_move, starts_with_key, validate_move,
};

// Crate-level exports - Lexicon store
pub use lexicon::{LexiconError, LexiconStore, MemoryLexicon};

// Crate-level exports - Database persistence
pub use db::{DbError, DbErrorKind, LexiconRepository, NewWord, WordRow};

// Crate-level exports - Corpus import
pub use seed::{CorpusSource, ImportReport, SeedError, SeedPolicy, import_corpus, parse_corpus};

// Crate-level exports - Configuration
pub use config::{AppConfig, BotConfig, ConfigError, DatabaseConfig, ServerConfig};

// Crate-level exports - Console game
pub use console::{ConsoleResult, play};

// Crate-level exports - HTTP server
pub use server::{ApiError, AppState, build_router, serve};
