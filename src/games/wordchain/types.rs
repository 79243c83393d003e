//! Core domain types for the word chain game.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// Lexicon partition a game is played in.
///
/// The two partitions chain differently: primary words (multi-syllable,
/// e.g. Vietnamese compounds) link through their last space-delimited token,
/// secondary words (e.g. English) link through their last character.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LanguageMode {
    /// Token-linked partition (wire alias `vn`).
    #[serde(alias = "vn")]
    #[strum(to_string = "primary", serialize = "vn")]
    Primary,
    /// Character-linked partition (wire alias `en`).
    #[serde(alias = "en")]
    #[strum(to_string = "secondary", serialize = "en")]
    Secondary,
}

impl LanguageMode {
    /// Returns the value stored in the `lang` column.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Trims and lower-cases raw input.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A normalized word within one lexicon partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Word {
    /// Trimmed, lower-cased text.
    text: String,
    /// Partition the word belongs to.
    mode: LanguageMode,
}

impl Word {
    /// Creates a word, normalizing the text.
    #[instrument(skip(text), fields(mode = %mode))]
    pub fn new(text: impl AsRef<str>, mode: LanguageMode) -> Self {
        Self {
            text: normalize(text.as_ref()),
            mode,
        }
    }

    /// Returns true if the normalized text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the word and returns its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// The key the next word in a chain must begin with.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct LinkingKey(String);

impl LinkingKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LinkingKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Words already played in a session, in play order.
///
/// Supplied by the caller on every request; entries are normalized on the
/// way in and never duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct UsedWords {
    words: Vec<String>,
}

impl UsedWords {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the normalized form of `text` was already played.
    pub fn contains(&self, text: &str) -> bool {
        let text = normalize(text);
        self.words.iter().any(|w| *w == text)
    }

    /// Appends a word. Returns false if it was blank or already present.
    pub fn push(&mut self, text: &str) -> bool {
        let text = normalize(text);
        if text.is_empty() || self.words.contains(&text) {
            return false;
        }
        self.words.push(text);
        true
    }

    /// Returns a copy of this transcript with `text` appended.
    pub fn with(&self, text: &str) -> Self {
        let mut next = self.clone();
        next.push(text);
        next
    }

    /// Returns the played words in order.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Returns the most recently played word.
    pub fn last(&self) -> Option<&str> {
        self.words.last().map(String::as_str)
    }

    /// Number of words played.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if nothing has been played.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<String>> for UsedWords {
    fn from(raw: Vec<String>) -> Self {
        let mut used = Self::new();
        for word in &raw {
            used.push(word);
        }
        used
    }
}

impl From<UsedWords> for Vec<String> {
    fn from(used: UsedWords) -> Self {
        used.words
    }
}

impl<'a> FromIterator<&'a str> for UsedWords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut used = Self::new();
        for word in iter {
            used.push(word);
        }
        used
    }
}

/// Why a submitted word was refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "code", content = "expected", rename_all = "snake_case")]
pub enum RejectReason {
    /// Input was blank after trimming.
    #[display("Please enter a word")]
    EmptyInput,
    /// The word was already played in this session.
    #[display("This word has already been used")]
    AlreadyUsed,
    /// The word is not in the lexicon for this mode.
    #[display("This word is not in the dictionary")]
    NotInLexicon,
    /// The word does not start with the required key.
    #[display("Wrong start! The word must begin with \"{}\"", _0)]
    WrongStart(LinkingKey),
}

impl RejectReason {
    /// Returns a stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::AlreadyUsed => "already_used",
            Self::NotInLexicon => "not_in_lexicon",
            Self::WrongStart(_) => "wrong_start",
        }
    }
}

/// Result of validating one candidate move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The move was refused; the game continues.
    Illegal(RejectReason),
    /// The move was accepted.
    Legal {
        /// True if the opponent has no continuation after this move.
        is_terminal: bool,
    },
}

impl MoveOutcome {
    /// Returns true for [`MoveOutcome::Legal`].
    pub fn is_legal(&self) -> bool {
        matches!(self, Self::Legal { .. })
    }
}

/// Result of the bot's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotResult {
    /// No word satisfies the linking constraint; the bot resigns.
    NoWordAvailable,
    /// The bot played a word.
    Played {
        /// Word chosen by the bot.
        word: Word,
        /// True if the player has no continuation after this word.
        is_terminal: bool,
    },
}
