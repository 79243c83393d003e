//! Word Chain - Unified CLI
//!
//! Serves the REST API, imports word lists and runs console games.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use word_chain::{AppConfig, CorpusSource, LanguageMode, LexiconRepository, TurnOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve {
            host,
            port,
            db_path,
        } => {
            config.set_listen(host, port);
            config.set_db_path(db_path);
            word_chain::serve(&config).await
        }
        Command::Seed {
            mode,
            source,
            replace,
            db_path,
        } => {
            config.set_db_path(db_path);
            run_seed(&config, mode, &source, replace).await
        }
        Command::Play { mode, db_path } => {
            config.set_db_path(db_path);
            run_play(config, mode).await
        }
        Command::Migrate { db_path } => {
            config.set_db_path(db_path);
            let repository = LexiconRepository::new(config.database().path().clone())?;
            let applied = repository.run_migrations()?;
            info!(applied, "Database is up to date");
            Ok(())
        }
    }
}

/// Import a word list into the lexicon
#[instrument(skip(config), fields(db = %config.database().path()))]
async fn run_seed(config: &AppConfig, mode: LanguageMode, source: &str, replace: bool) -> Result<()> {
    let corpus = CorpusSource::parse(source).fetch().await?;
    let repository = LexiconRepository::open(config.database().path().clone())?;
    let policy = config.seed().clone();

    let report = tokio::task::spawn_blocking(move || -> Result<_> {
        if replace {
            let removed = repository.clear(None)?;
            info!(removed, "Cleared existing lexicon");
        }
        Ok(word_chain::import_corpus(&repository, &corpus, mode, &policy)?)
    })
    .await??;

    info!(
        lines = report.lines(),
        accepted = report.accepted(),
        inserted = report.inserted(),
        "Seeding complete"
    );
    Ok(())
}

/// Run a console game against the bot
#[instrument(skip(config), fields(db = %config.database().path()))]
async fn run_play(config: AppConfig, mode: LanguageMode) -> Result<()> {
    let repository = LexiconRepository::open(config.database().path().clone())?;
    let orchestrator = TurnOrchestrator::new(repository, config.bot().policy());
    let mut rng = match config.bot().seed() {
        Some(seed) => ChaCha8Rng::seed_from_u64(*seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let result = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        word_chain::play(&orchestrator, mode, stdin.lock(), std::io::stdout(), &mut rng)
    })
    .await??;

    info!(?result, "Game over");
    Ok(())
}
