//! SQLite persistence for the lexicon.

mod error;
mod models;
mod repository;
mod schema;

pub use error::{DbError, DbErrorKind};
pub use models::{NewWord, WordRow};
pub use repository::LexiconRepository;
