//! Database repository for lexicon entries.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rand::{Rng, RngCore};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, DbErrorKind, NewWord, WordRow, schema::words};
use crate::games::wordchain::{LanguageMode, LinkingKey, UsedWords, Word, normalize};
use crate::lexicon::{LexiconError, LexiconStore};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Rows per multi-row insert; keeps bind parameters under SQLite's limit.
const INSERT_CHUNK: usize = 300;

/// Database repository for the lexicon.
///
/// Opens a fresh connection per operation, so `":memory:"` gives every call
/// an empty database. Use a file path (a temp file in tests) instead.
#[derive(Debug, Clone)]
pub struct LexiconRepository {
    db_path: String,
}

impl LexiconRepository {
    /// Creates a repository for the database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path))]
    pub fn new(db_path: impl Into<String>) -> Result<Self, DbError> {
        let db_path = db_path.into();
        if db_path.trim().is_empty() {
            return Err(DbError::new(DbErrorKind::Connection, "Database path is empty"));
        }
        info!(path = %db_path, "Creating LexiconRepository");
        Ok(Self { db_path })
    }

    /// Creates a repository and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path))]
    pub fn open(db_path: impl Into<String>) -> Result<Self, DbError> {
        let repo = Self::new(db_path)?;
        repo.run_migrations()?;
        Ok(repo)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })
    }

    /// Applies pending schema migrations. Returns how many were applied.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }

    /// Looks up a word by text in either partition.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_word(&self, text: &str) -> Result<Option<WordRow>, DbError> {
        let mut conn = self.connection()?;
        let row = words::table
            .filter(words::text.eq(normalize(text)))
            .first::<WordRow>(&mut conn)
            .optional()?;
        debug!(found = row.is_some(), "Word lookup");
        Ok(row)
    }

    /// Adds a word. Returns `None` if its text already exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the word is blank or a database error occurs.
    #[instrument(skip(self), fields(word = %word))]
    pub fn add_word(&self, word: &Word) -> Result<Option<WordRow>, DbError> {
        let new_word = Self::entry_for(word)?;
        let mut conn = self.connection()?;

        let inserted = diesel::insert_or_ignore_into(words::table)
            .values(&new_word)
            .execute(&mut conn)?;
        if inserted == 0 {
            warn!("Word already exists");
            return Ok(None);
        }

        let row = words::table
            .filter(words::text.eq(new_word.text().as_str()))
            .first::<WordRow>(&mut conn)?;
        info!(id = row.id(), "Word added");
        Ok(Some(row))
    }

    /// Inserts a word or moves an existing one to the given partition.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the word is blank or a database error occurs.
    #[instrument(skip(self), fields(word = %word))]
    pub fn upsert_word(&self, word: &Word) -> Result<WordRow, DbError> {
        let new_word = Self::entry_for(word)?;
        let mut conn = self.connection()?;

        let row = diesel::insert_into(words::table)
            .values(&new_word)
            .on_conflict(words::text)
            .do_update()
            .set(&new_word)
            .returning(WordRow::as_returning())
            .get_result(&mut conn)?;
        info!(id = row.id(), lang = %row.lang(), "Word upserted");
        Ok(row)
    }

    /// Deletes a word by text. Returns true if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_word(&self, text: &str) -> Result<bool, DbError> {
        let mut conn = self.connection()?;
        let deleted =
            diesel::delete(words::table.filter(words::text.eq(normalize(text)))).execute(&mut conn)?;
        info!(deleted, "Word delete");
        Ok(deleted > 0)
    }

    /// Bulk-inserts entries, skipping texts that already exist.
    /// Returns how many rows were inserted.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs; the batch is rolled back.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub fn insert_words(&self, entries: &[NewWord]) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let inserted = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let mut inserted = 0;
            for chunk in entries.chunks(INSERT_CHUNK) {
                inserted += diesel::insert_or_ignore_into(words::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(inserted)
        })?;
        info!(inserted, skipped = entries.len() - inserted, "Bulk insert finished");
        Ok(inserted)
    }

    /// Deletes every entry, or only those of `mode`. Returns the row count.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&self, mode: Option<LanguageMode>) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let deleted = match mode {
            Some(mode) => diesel::delete(words::table.filter(words::lang.eq(mode.as_db_str())))
                .execute(&mut conn)?,
            None => diesel::delete(words::table).execute(&mut conn)?,
        };
        info!(deleted, "Lexicon cleared");
        Ok(deleted)
    }

    /// Counts entries, optionally restricted to `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count_words(&self, mode: Option<LanguageMode>) -> Result<i64, DbError> {
        let mut conn = self.connection()?;
        let mut query = words::table.into_boxed();
        if let Some(mode) = mode {
            query = query.filter(words::lang.eq(mode.as_db_str()));
        }
        Ok(query.count().get_result(&mut conn)?)
    }

    fn entry_for(word: &Word) -> Result<NewWord, DbError> {
        NewWord::from_word(word)
            .ok_or_else(|| DbError::new(DbErrorKind::InvalidData, "Cannot store a blank word"))
    }

    /// Entries of `mode` that may follow a word linking to `key` (any entry
    /// when `key` is `None`), not in `excluding`.
    fn candidates(
        mode: LanguageMode,
        key: Option<&LinkingKey>,
        excluding: &UsedWords,
    ) -> words::BoxedQuery<'static, Sqlite> {
        let mut query = words::table
            .filter(words::lang.eq(mode.as_db_str()))
            .into_boxed();
        if let Some(key) = key {
            query = query.filter(words::start_key.eq(key.as_str().to_string()));
            // A one-token primary entry has start_key == text and cannot follow anything.
            if mode == LanguageMode::Primary {
                query = query.filter(words::text.ne(words::start_key));
            }
        }
        if !excluding.is_empty() {
            query = query.filter(words::text.ne_all(excluding.as_slice().to_vec()));
        }
        query
    }
}

impl LexiconStore for LexiconRepository {
    #[instrument(skip(self), fields(word = %word))]
    fn exists_word(&self, word: &Word) -> Result<bool, LexiconError> {
        let mut conn = self.connection()?;
        let exists = diesel::select(diesel::dsl::exists(
            words::table
                .filter(words::text.eq(word.text().as_str()))
                .filter(words::lang.eq(word.mode().as_db_str())),
        ))
        .get_result::<bool>(&mut conn)
        .map_err(DbError::from)?;
        Ok(exists)
    }

    #[instrument(skip(self, excluding), fields(excluding = excluding.len()))]
    fn count_by_linking_key(
        &self,
        key: &LinkingKey,
        mode: LanguageMode,
        excluding: &UsedWords,
    ) -> Result<u64, LexiconError> {
        let mut conn = self.connection()?;
        let count: i64 = Self::candidates(mode, Some(key), excluding)
            .count()
            .get_result(&mut conn)
            .map_err(DbError::from)?;
        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self, excluding, rng), fields(excluding = excluding.len()))]
    fn sample_random(
        &self,
        mode: LanguageMode,
        key: Option<&LinkingKey>,
        excluding: &UsedWords,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Word>, LexiconError> {
        let mut conn = self.connection()?;
        let total: i64 = Self::candidates(mode, key, excluding)
            .count()
            .get_result(&mut conn)
            .map_err(DbError::from)?;
        if total <= 0 {
            debug!("No candidates to sample");
            return Ok(None);
        }

        let offset = rng.gen_range(0..total);
        let row = Self::candidates(mode, key, excluding)
            .order(words::id.asc())
            .offset(offset)
            .first::<WordRow>(&mut conn)
            .optional()
            .map_err(DbError::from)?;
        debug!(total, offset, found = row.is_some(), "Sampled candidate");

        Ok(row.map(|row| row.to_word()).transpose()?)
    }
}
