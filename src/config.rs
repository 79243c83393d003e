//! Application configuration.
//!
//! Values come from an optional TOML file, then environment variables
//! (`WORD_CHAIN_HOST`, `PORT`, `DATABASE_URL`, `BOT_CHECKMATE_SAMPLES`,
//! `BOT_SEED`), then command-line flags applied by the binary.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::games::wordchain::BotPolicy;
use crate::seed::SeedPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    #[serde(default)]
    server: ServerConfig,
    /// Lexicon database.
    #[serde(default)]
    database: DatabaseConfig,
    /// Bot behaviour.
    #[serde(default)]
    bot: BotConfig,
    /// Corpus import rules.
    #[serde(default)]
    seed: SeedPolicy,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Lexicon database settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path.
    #[serde(default = "default_db_path")]
    path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Bot settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// Candidates examined per turn while looking for a checkmating word.
    /// One means plain uniform play.
    #[serde(default = "default_checkmate_samples")]
    checkmate_samples: usize,
    /// Fixed RNG seed; every request then replays the same random stream.
    #[serde(default)]
    seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            checkmate_samples: default_checkmate_samples(),
            seed: None,
        }
    }
}

impl BotConfig {
    /// Returns the bot policy these settings describe.
    pub fn policy(&self) -> BotPolicy {
        BotPolicy::from_samples(self.checkmate_samples)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_db_path() -> String {
    "word_chain.db".to_string()
}

fn default_checkmate_samples() -> usize {
    1
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(port = config.server.port, db = %config.database.path, "Config loaded");
        Ok(config)
    }

    /// Loads the file at `path` if given, else defaults, then applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file or an environment value is invalid.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides looked up through `lookup` (the environment in
    /// production, a map in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric value does not parse.
    #[instrument(skip(self, lookup))]
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("WORD_CHAIN_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }
        if let Some(path) = lookup("DATABASE_URL") {
            self.database.path = path;
        }
        if let Some(samples) = lookup("BOT_CHECKMATE_SAMPLES") {
            self.bot.checkmate_samples = parse_var("BOT_CHECKMATE_SAMPLES", &samples)?;
        }
        if let Some(seed) = lookup("BOT_SEED") {
            self.bot.seed = Some(parse_var("BOT_SEED", &seed)?);
        }
        Ok(())
    }

    /// Overrides the listener address.
    pub fn set_listen(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    /// Overrides the database path.
    pub fn set_db_path(&mut self, path: Option<String>) {
        if let Some(path) = path {
            self.database.path = path;
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::new(format!("Invalid {} '{}': {}", name, value, e)))
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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
