//! Command-line interface for word_chain.

use clap::{Parser, Subcommand};

use word_chain::LanguageMode;

/// Word Chain - word-chaining game server with a bot opponent
#[derive(Parser, Debug)]
#[command(name = "word_chain")]
#[command(about = "Word-chaining game engine with a bot opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the lexicon database
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Import a word list into the lexicon
    Seed {
        /// Lexicon partition the words belong to (primary/vn, secondary/en)
        #[arg(short, long)]
        mode: LanguageMode,

        /// File path or http(s) URL of the word list, one entry per line
        #[arg(short, long)]
        source: String,

        /// Delete every existing entry before importing
        #[arg(long)]
        replace: bool,

        /// Path to the lexicon database
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Play against the bot in the terminal
    Play {
        /// Lexicon partition to play in
        #[arg(short, long, default_value = "primary")]
        mode: LanguageMode,

        /// Path to the lexicon database
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Apply pending database migrations
    Migrate {
        /// Path to the lexicon database
        #[arg(long)]
        db_path: Option<String>,
    },
}
