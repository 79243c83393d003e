//! Database models for lexicon entries.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;
use tracing::instrument;

use crate::db::{DbError, DbErrorKind, schema};
use crate::games::wordchain::{LanguageMode, Word, derive_start_key};

/// Stored lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::words)]
#[serde(rename_all = "camelCase")]
pub struct WordRow {
    id: i32,
    text: String,
    lang: String,
    start_key: String,
    created_at: NaiveDateTime,
}

impl WordRow {
    /// Parses the stored `lang` column.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the column holds an unknown mode.
    #[instrument(skip(self), fields(lang = %self.lang))]
    pub fn mode(&self) -> Result<LanguageMode, DbError> {
        self.lang.parse().map_err(|_| {
            DbError::new(
                DbErrorKind::InvalidData,
                format!("Unknown lang '{}' for word '{}'", self.lang, self.text),
            )
        })
    }

    /// Converts the row into a domain word.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the row's mode is invalid.
    pub fn to_word(&self) -> Result<Word, DbError> {
        Ok(Word::new(&self.text, self.mode()?))
    }
}

/// Insertable lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, AsChangeset, new, Getters)]
#[diesel(table_name = schema::words)]
pub struct NewWord {
    text: String,
    lang: String,
    start_key: String,
}

impl NewWord {
    /// Builds an entry for `word`, deriving its start key.
    ///
    /// Returns `None` for a blank word.
    #[instrument(skip(word), fields(word = %word))]
    pub fn from_word(word: &Word) -> Option<Self> {
        let start_key = derive_start_key(word.text(), *word.mode()).ok()?;
        Some(Self::new(
            word.text().clone(),
            word.mode().as_db_str().to_string(),
            start_key.as_str().to_string(),
        ))
    }
}
