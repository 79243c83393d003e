//! Bulk lexicon import from plain-text word lists.
//!
//! Corpora are one entry per line. Primary-mode lists may carry definitions
//! after a `:` and use `_` between syllables; only entries with the
//! configured number of segments are kept. Secondary-mode lists keep words
//! longer than one character, up to a line limit.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

use crate::db::{DbError, LexiconRepository, NewWord};
use crate::games::wordchain::{LanguageMode, Word, normalize};

/// Filtering rules applied while importing a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Exact number of space-separated segments a primary entry must have.
    #[serde(default = "default_primary_segments")]
    primary_segments: usize,

    /// Maximum number of corpus lines read for secondary mode.
    #[serde(default = "default_secondary_limit")]
    secondary_limit: usize,
}

fn default_primary_segments() -> usize {
    2
}

fn default_secondary_limit() -> usize {
    20_000
}

impl SeedPolicy {
    /// Creates a policy.
    pub fn new(primary_segments: usize, secondary_limit: usize) -> Self {
        Self {
            primary_segments,
            secondary_limit,
        }
    }
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self::new(default_primary_segments(), default_secondary_limit())
    }
}

/// Counts from one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize)]
pub struct ImportReport {
    /// Lines examined.
    lines: usize,
    /// Distinct entries that passed the filters.
    accepted: usize,
    /// Entries actually written (existing texts are skipped).
    inserted: usize,
}

/// Where a corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// Local file.
    File(PathBuf),
    /// `http://` or `https://` URL.
    Url(String),
}

impl CorpusSource {
    /// Interprets `source` as a URL when it has an http(s) scheme, else a path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::File(PathBuf::from(source))
        }
    }

    /// Reads the corpus text.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the file cannot be read or the download fails.
    #[instrument]
    pub async fn fetch(&self) -> Result<String, SeedError> {
        match self {
            Self::File(path) => {
                info!(path = %path.display(), "Reading corpus file");
                tokio::fs::read_to_string(path).await.map_err(|e| {
                    SeedError::new(format!("Failed to read {}: {}", path.display(), e))
                })
            }
            Self::Url(url) => {
                info!(url = %url, "Downloading corpus");
                let response = reqwest::get(url)
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| SeedError::new(format!("Failed to download {}: {}", url, e)))?;
                response
                    .text()
                    .await
                    .map_err(|e| SeedError::new(format!("Failed to read body of {}: {}", url, e)))
            }
        }
    }
}

/// Applies `policy` to a corpus and returns the distinct words it yields,
/// in corpus order, together with the number of lines examined.
#[instrument(skip(corpus), fields(bytes = corpus.len()))]
pub fn parse_corpus(corpus: &str, mode: LanguageMode, policy: &SeedPolicy) -> (Vec<Word>, usize) {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    let mut lines = 0;

    let limit = match mode {
        LanguageMode::Primary => usize::MAX,
        LanguageMode::Secondary => policy.secondary_limit,
    };

    for line in corpus.lines().take(limit) {
        lines += 1;
        let Some(text) = clean_line(line, mode, policy) else {
            continue;
        };
        if seen.insert(text.clone()) {
            words.push(Word::new(text, mode));
        }
    }

    debug!(lines, accepted = words.len(), "Corpus parsed");
    (words, lines)
}

fn clean_line(line: &str, mode: LanguageMode, policy: &SeedPolicy) -> Option<String> {
    let mut text = normalize(line);
    match mode {
        LanguageMode::Primary => {
            if let Some((head, _definition)) = text.split_once(':') {
                text = head.trim().to_string();
            }
            let text = text.replace('_', " ");
            let segments = text.split(' ').count();
            (!text.is_empty() && segments == policy.primary_segments).then_some(text)
        }
        LanguageMode::Secondary => (text.chars().count() > 1).then_some(text),
    }
}

/// Parses a corpus and writes its words into the repository.
///
/// # Errors
///
/// Returns [`SeedError`] if the database write fails.
#[instrument(skip(repository, corpus), fields(bytes = corpus.len()))]
pub fn import_corpus(
    repository: &LexiconRepository,
    corpus: &str,
    mode: LanguageMode,
    policy: &SeedPolicy,
) -> Result<ImportReport, SeedError> {
    let (words, lines) = parse_corpus(corpus, mode, policy);
    let entries: Vec<NewWord> = words.iter().filter_map(NewWord::from_word).collect();
    let inserted = repository.insert_words(&entries)?;

    let report = ImportReport {
        lines,
        accepted: entries.len(),
        inserted,
    };
    info!(?report, "Corpus imported");
    Ok(report)
}

/// Corpus import error.
#[derive(Debug, Clone, Display, Error)]
#[display("Seed error: {} at {}:{}", message, file, line)]
pub struct SeedError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SeedError {
    /// Creates a new seed error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<DbError> for SeedError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        Self::new(err.to_string())
    }
}
