//! Line-oriented console game against the bot.
//!
//! The console keeps the transcript on the caller's side, exactly as a
//! remote client of the REST API would: the bot opens, then every line the
//! player types is played as one exchange.

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::RngCore;
use tracing::{debug, info, instrument};

use crate::games::wordchain::{
    BotMoveRequest, CheckWordRequest, ExchangeOutcome, LanguageMode, TurnOrchestrator, UsedWords,
    WinReason,
};
use crate::lexicon::LexiconStore;

/// How a console game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleResult {
    /// The player won.
    PlayerWon,
    /// The bot won.
    BotWon,
    /// The player quit or input ended.
    Abandoned,
}

/// Plays one game reading moves from `input` and writing to `output`.
///
/// Typing `quit` (or closing input) abandons the game.
///
/// # Errors
///
/// Returns an error on I/O failure or if the lexicon cannot be queried.
#[instrument(skip_all, fields(mode = %mode))]
pub fn play<S, R, W>(
    orchestrator: &TurnOrchestrator<S>,
    mode: LanguageMode,
    mut input: R,
    mut output: W,
    rng: &mut dyn RngCore,
) -> Result<ConsoleResult>
where
    S: LexiconStore,
    R: BufRead,
    W: Write,
{
    let mut used = UsedWords::new();

    let opening = orchestrator.bot_answer(
        &BotMoveRequest {
            previous_word: None,
            mode,
            used_words: used.clone(),
        },
        rng,
    )?;
    let Some(mut previous) = opening.word else {
        writeln!(output, "The dictionary is empty. Seed it first.")?;
        return Ok(ConsoleResult::Abandoned);
    };
    used.push(&previous);
    writeln!(output, "bot> {}", previous)?;
    if opening.is_terminal == Some(true) {
        writeln!(output, "You have no way out. The bot wins!")?;
        return Ok(ConsoleResult::BotWon);
    }

    let mut line = String::new();
    loop {
        write!(output, "you> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("quit") {
            info!(moves = used.len(), "Game abandoned");
            return Ok(ConsoleResult::Abandoned);
        }

        let request = CheckWordRequest {
            candidate_word: line.clone(),
            previous_word: Some(previous.clone()),
            mode,
            used_words: used.clone(),
        };
        let outcome = orchestrator.play_exchange(&request, rng)?;
        debug!(?outcome, "Exchange played");

        match outcome {
            ExchangeOutcome::Rejected { reason } => {
                writeln!(output, "!! {}", reason)?;
            }
            ExchangeOutcome::PlayerWins { by, .. } => {
                let message = match by {
                    WinReason::Checkmate => "The bot has no way out. You win!",
                    WinReason::BotResigned => "The bot ran out of words. You win!",
                };
                writeln!(output, "{}", message)?;
                return Ok(ConsoleResult::PlayerWon);
            }
            ExchangeOutcome::BotWins { bot_word, .. } => {
                writeln!(output, "bot> {}", bot_word)?;
                writeln!(output, "You have no way out. The bot wins!")?;
                return Ok(ConsoleResult::BotWon);
            }
            ExchangeOutcome::Continue {
                bot_word,
                used_words,
                ..
            } => {
                writeln!(output, "bot> {}", bot_word)?;
                previous = bot_word;
                used = used_words;
            }
        }
    }
}
