//! Turn orchestration: one player move followed by the bot's reply.
//!
//! The orchestrator is stateless between calls. Every request carries the
//! full session (previous word and used words) and every outcome carries the
//! updated transcript back to the caller.

use super::{
    BotPolicy, BotResult, LanguageMode, LinkingKey, MoveOutcome, RejectReason, UsedWords,
    WordChainError, normalize, select_bot_move, validate_move,
};
use crate::lexicon::LexiconStore;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use tracing::{debug, info, instrument};

/// A player's move with the session history it is played against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckWordRequest {
    /// Word submitted by the player.
    #[serde(alias = "currentWord")]
    pub candidate_word: String,
    /// Word the player is answering, absent on an opening move.
    #[serde(default)]
    pub previous_word: Option<String>,
    /// Lexicon partition.
    #[serde(alias = "lang")]
    pub mode: LanguageMode,
    /// Words already played by either side.
    #[serde(default)]
    pub used_words: UsedWords,
}

/// Verdict on a player's move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckWordResponse {
    /// Whether the move was accepted.
    pub legal: bool,
    /// Machine-readable rejection code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Key the word had to start with, for `wrong_start` rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_prefix: Option<LinkingKey>,
    /// Human-readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// For legal moves, whether the bot is left without a reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_terminal: Option<bool>,
}

impl From<MoveOutcome> for CheckWordResponse {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Illegal(reason) => Self {
                legal: false,
                reason: Some(reason.code().to_string()),
                expected_prefix: match &reason {
                    RejectReason::WrongStart(key) => Some(key.clone()),
                    _ => None,
                },
                message: Some(reason.to_string()),
                is_terminal: None,
            },
            MoveOutcome::Legal { is_terminal } => Self {
                legal: true,
                reason: None,
                expected_prefix: None,
                message: is_terminal
                    .then(|| "Brilliant! The bot has no way out. You win!".to_string()),
                is_terminal: Some(is_terminal),
            },
        }
    }
}

/// Session state the bot is asked to answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotMoveRequest {
    /// Word the bot must answer, absent when the bot opens.
    #[serde(default)]
    pub previous_word: Option<String>,
    /// Lexicon partition.
    #[serde(alias = "lang")]
    pub mode: LanguageMode,
    /// Words already played by either side.
    #[serde(default)]
    pub used_words: UsedWords,
}

/// The bot's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotMoveResponse {
    /// False when the bot resigns.
    pub available: bool,
    /// Word played by the bot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    /// Whether the player is left without a reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_terminal: Option<bool>,
    /// Human-readable summary of game-ending replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<BotResult> for BotMoveResponse {
    fn from(result: BotResult) -> Self {
        match result {
            BotResult::NoWordAvailable => Self {
                available: false,
                word: None,
                is_terminal: None,
                message: Some("The bot ran out of words. You win!".to_string()),
            },
            BotResult::Played { word, is_terminal } => Self {
                available: true,
                message: is_terminal.then(|| {
                    format!("The bot played \"{word}\". You have no way out. The bot wins!")
                }),
                word: Some(word.into_text()),
                is_terminal: Some(is_terminal),
            },
        }
    }
}

/// How the player won an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    /// The player's word left the bot without a continuation.
    Checkmate,
    /// The bot found no word to play.
    BotResigned,
}

/// Result of one full exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ExchangeOutcome {
    /// The player's word was refused; the game goes on.
    Rejected {
        /// Why the word was refused.
        reason: RejectReason,
    },
    /// The game is over and the player won.
    PlayerWins {
        /// Word the player played.
        player_word: String,
        /// How the game was won.
        by: WinReason,
        /// Transcript after the exchange.
        used_words: UsedWords,
    },
    /// The game is over and the bot won.
    BotWins {
        /// Word the player played.
        player_word: String,
        /// Checkmating word played by the bot.
        bot_word: String,
        /// Transcript after the exchange.
        used_words: UsedWords,
    },
    /// Both sides moved; the player is to move next.
    Continue {
        /// Word the player played.
        player_word: String,
        /// Word the bot answered with.
        bot_word: String,
        /// Transcript after the exchange.
        used_words: UsedWords,
    },
}

impl ExchangeOutcome {
    /// Returns true if the game ended in this exchange.
    pub fn is_game_over(&self) -> bool {
        matches!(self, Self::PlayerWins { .. } | Self::BotWins { .. })
    }
}

/// Phases of one exchange.
#[derive(Debug, IntoStaticStr)]
enum ExchangePhase {
    AwaitingPlayerMove,
    ValidatingPlayerMove,
    AwaitingBotMove {
        player_word: String,
        used: UsedWords,
    },
    BotMoveComputed {
        player_word: String,
        used: UsedWords,
        result: BotResult,
    },
    Done(ExchangeOutcome),
}

/// Drives exchanges against a lexicon store.
#[derive(Debug, Clone)]
pub struct TurnOrchestrator<S> {
    store: S,
    policy: BotPolicy,
}

impl<S: LexiconStore> TurnOrchestrator<S> {
    /// Creates an orchestrator over `store` using `policy` for the bot.
    pub fn new(store: S, policy: BotPolicy) -> Self {
        Self { store, policy }
    }

    /// Returns the lexicon store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the bot policy.
    pub fn policy(&self) -> BotPolicy {
        self.policy
    }

    /// Validates a player's move without answering it.
    ///
    /// # Errors
    ///
    /// Returns [`WordChainError`] if the lexicon cannot be queried.
    #[instrument(skip(self, request), fields(mode = %request.mode))]
    pub fn check_word(&self, request: &CheckWordRequest) -> Result<CheckWordResponse, WordChainError> {
        let outcome = validate_move(
            &self.store,
            &request.candidate_word,
            request.previous_word.as_deref(),
            request.mode,
            &request.used_words,
        )?;
        Ok(outcome.into())
    }

    /// Asks the bot for a move.
    ///
    /// # Errors
    ///
    /// Returns [`WordChainError`] if the lexicon cannot be queried.
    #[instrument(skip(self, request, rng), fields(mode = %request.mode))]
    pub fn bot_answer(
        &self,
        request: &BotMoveRequest,
        rng: &mut dyn RngCore,
    ) -> Result<BotMoveResponse, WordChainError> {
        let result = select_bot_move(
            &self.store,
            request.previous_word.as_deref(),
            request.mode,
            &request.used_words,
            self.policy,
            rng,
        )?;
        Ok(result.into())
    }

    /// Plays one exchange: validate the player's word, check for checkmate,
    /// let the bot answer, check for checkmate again.
    ///
    /// # Errors
    ///
    /// Returns [`WordChainError`] if the lexicon cannot be queried.
    #[instrument(skip(self, request, rng), fields(mode = %request.mode, used = request.used_words.len()))]
    pub fn play_exchange(
        &self,
        request: &CheckWordRequest,
        rng: &mut dyn RngCore,
    ) -> Result<ExchangeOutcome, WordChainError> {
        let mode = request.mode;
        let mut phase = ExchangePhase::AwaitingPlayerMove;

        loop {
            debug!(phase = <&'static str>::from(&phase), "Exchange phase");
            phase = match phase {
                ExchangePhase::AwaitingPlayerMove => ExchangePhase::ValidatingPlayerMove,

                ExchangePhase::ValidatingPlayerMove => {
                    let outcome = validate_move(
                        &self.store,
                        &request.candidate_word,
                        request.previous_word.as_deref(),
                        mode,
                        &request.used_words,
                    )?;
                    let player_word = normalize(&request.candidate_word);
                    let used = request.used_words.with(&player_word);
                    match outcome {
                        MoveOutcome::Illegal(reason) => {
                            ExchangePhase::Done(ExchangeOutcome::Rejected { reason })
                        }
                        MoveOutcome::Legal { is_terminal: true } => {
                            ExchangePhase::Done(ExchangeOutcome::PlayerWins {
                                player_word,
                                by: WinReason::Checkmate,
                                used_words: used,
                            })
                        }
                        MoveOutcome::Legal { is_terminal: false } => {
                            ExchangePhase::AwaitingBotMove { player_word, used }
                        }
                    }
                }

                ExchangePhase::AwaitingBotMove { player_word, used } => {
                    let result = select_bot_move(
                        &self.store,
                        Some(&player_word),
                        mode,
                        &used,
                        self.policy,
                        rng,
                    )?;
                    ExchangePhase::BotMoveComputed {
                        player_word,
                        used,
                        result,
                    }
                }

                ExchangePhase::BotMoveComputed {
                    player_word,
                    used,
                    result,
                } => ExchangePhase::Done(match result {
                    BotResult::NoWordAvailable => ExchangeOutcome::PlayerWins {
                        player_word,
                        by: WinReason::BotResigned,
                        used_words: used,
                    },
                    BotResult::Played { word, is_terminal } => {
                        let used_words = used.with(word.text());
                        let bot_word = word.into_text();
                        if is_terminal {
                            ExchangeOutcome::BotWins {
                                player_word,
                                bot_word,
                                used_words,
                            }
                        } else {
                            ExchangeOutcome::Continue {
                                player_word,
                                bot_word,
                                used_words,
                            }
                        }
                    }
                }),

                ExchangePhase::Done(outcome) => {
                    info!(game_over = outcome.is_game_over(), "Exchange finished");
                    return Ok(outcome);
                }
            };
        }
    }
}
