//! Tests for turn orchestration.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use word_chain::{
    BotMoveRequest, BotPolicy, CheckWordRequest, ExchangeOutcome, LanguageMode, LinkingKey,
    MemoryLexicon, RejectReason, TurnOrchestrator, UsedWords, WinReason,
};

fn orchestrator(words: &[&str]) -> TurnOrchestrator<MemoryLexicon> {
    let lexicon = MemoryLexicon::new().with_words(LanguageMode::Secondary, words.iter().copied());
    TurnOrchestrator::new(lexicon, BotPolicy::Uniform)
}

fn request(candidate: &str, previous: Option<&str>, used: &[&str]) -> CheckWordRequest {
    CheckWordRequest {
        candidate_word: candidate.to_string(),
        previous_word: previous.map(str::to_string),
        mode: LanguageMode::Secondary,
        used_words: used.iter().copied().collect(),
    }
}

#[test]
fn test_rejected_move_leaves_game_running() {
    let orchestrator = orchestrator(&["cat", "tiger", "rat"]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let outcome = orchestrator
        .play_exchange(&request("rat", Some("cat"), &["cat"]), &mut rng)
        .expect("Exchange failed");

    assert_eq!(
        outcome,
        ExchangeOutcome::Rejected {
            reason: RejectReason::WrongStart(LinkingKey::from("t".to_string())),
        }
    );
    assert!(!outcome.is_game_over());
}

#[test]
fn test_bot_wins_by_checkmate() {
    // Player "tiger", bot must answer "rat", and nothing starts with "t" afterwards.
    let orchestrator = orchestrator(&["cat", "tiger", "rat"]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let outcome = orchestrator
        .play_exchange(&request("Tiger", Some("cat"), &["cat"]), &mut rng)
        .expect("Exchange failed");

    let expected_used: UsedWords = ["cat", "tiger", "rat"].into_iter().collect();
    assert_eq!(
        outcome,
        ExchangeOutcome::BotWins {
            player_word: "tiger".to_string(),
            bot_word: "rat".to_string(),
            used_words: expected_used,
        }
    );
    assert!(outcome.is_game_over());
}

#[test]
fn test_player_wins_by_checkmate() {
    let orchestrator = orchestrator(&["cat", "tiger", "rat", "toad"]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let outcome = orchestrator
        .play_exchange(&request("toad", Some("rat"), &["cat", "tiger", "rat"]), &mut rng)
        .expect("Exchange failed");

    match outcome {
        ExchangeOutcome::PlayerWins { player_word, by, used_words } => {
            assert_eq!(player_word, "toad");
            assert_eq!(by, WinReason::Checkmate);
            assert_eq!(used_words.last(), Some("toad"));
            assert_eq!(used_words.len(), 4);
        }
        other => panic!("Expected player win, got {:?}", other),
    }
}

#[test]
fn test_exchange_continues() {
    let orchestrator = orchestrator(&["cat", "tiger", "rat", "tar"]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let outcome = orchestrator
        .play_exchange(&request("tiger", Some("cat"), &["cat"]), &mut rng)
        .expect("Exchange failed");

    match outcome {
        ExchangeOutcome::Continue { player_word, bot_word, used_words } => {
            assert_eq!(player_word, "tiger");
            assert_eq!(bot_word, "rat");
            assert_eq!(used_words.as_slice(), ["cat", "tiger", "rat"]);
        }
        other => panic!("Expected the game to continue, got {:?}", other),
    }
}

#[test]
fn test_check_word_response_for_wrong_start() {
    let orchestrator = orchestrator(&["cat", "tiger", "rat"]);
    let response = orchestrator
        .check_word(&request("rat", Some("cat"), &["cat"]))
        .expect("Check failed");

    assert!(!response.legal);
    assert_eq!(response.reason.as_deref(), Some("wrong_start"));
    assert_eq!(response.expected_prefix, Some(LinkingKey::from("t".to_string())));
    assert_eq!(response.is_terminal, None);
}

#[test]
fn test_check_word_response_for_winning_move() {
    let orchestrator = orchestrator(&["cat", "tiger", "rat", "toad"]);
    let response = orchestrator
        .check_word(&request("toad", Some("rat"), &["cat", "tiger", "rat"]))
        .expect("Check failed");

    assert!(response.legal);
    assert_eq!(response.is_terminal, Some(true));
    assert!(response.message.is_some());
}

#[test]
fn test_bot_answer_resigns() {
    let orchestrator = orchestrator(&["cat", "tiger", "rat"]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let response = orchestrator
        .bot_answer(
            &BotMoveRequest {
                previous_word: Some("rat".to_string()),
                mode: LanguageMode::Secondary,
                used_words: ["cat", "tiger", "rat"].into_iter().collect(),
            },
            &mut rng,
        )
        .expect("Bot failed");

    assert!(!response.available);
    assert_eq!(response.word, None);
}

#[test]
fn test_request_accepts_legacy_field_names() {
    let request: CheckWordRequest = serde_json::from_str(
        r#"{"currentWord": "Tiger", "previousWord": "cat", "lang": "en", "usedWords": ["cat", "CAT"]}"#,
    )
    .expect("Request should parse");

    assert_eq!(request.candidate_word, "Tiger");
    assert_eq!(request.mode, LanguageMode::Secondary);
    assert_eq!(request.used_words.len(), 1);
}

#[test]
fn test_outcome_serializes_with_tag() {
    let outcome = ExchangeOutcome::Rejected {
        reason: RejectReason::WrongStart(LinkingKey::from("mèo".to_string())),
    };
    let json = serde_json::to_value(&outcome).expect("Outcome should serialize");
    assert_eq!(json["outcome"], "rejected");
    assert_eq!(json["reason"]["code"], "wrong_start");
    assert_eq!(json["reason"]["expected"], "mèo");
}

#[test]
fn test_orchestrator_exposes_store_and_policy() {
    let lexicon = MemoryLexicon::new().with_words(LanguageMode::Secondary, ["cat"]);
    let policy = BotPolicy::SeekCheckmate { samples: 4 };
    let orchestrator = TurnOrchestrator::new(lexicon, policy);

    assert_eq!(orchestrator.policy(), policy);
    assert_eq!(orchestrator.store().len(), 1);
}
