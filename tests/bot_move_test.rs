//! Tests for bot move selection.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use word_chain::{
    BotPolicy, BotResult, LanguageMode, MemoryLexicon, UsedWords, derive_start_key,
    select_bot_move,
};

fn english() -> MemoryLexicon {
    MemoryLexicon::new().with_words(LanguageMode::Secondary, ["cat", "tiger", "rat"])
}

#[test]
fn test_bot_resigns_when_no_word_links() {
    let used: UsedWords = ["cat", "tiger", "rat"].into_iter().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let result = select_bot_move(
        &english(),
        Some("rat"),
        LanguageMode::Secondary,
        &used,
        BotPolicy::Uniform,
        &mut rng,
    )
    .expect("Bot failed");
    assert_eq!(result, BotResult::NoWordAvailable);
}

#[test]
fn test_bot_plays_only_qualifying_word() {
    let used: UsedWords = ["cat"].into_iter().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let result = select_bot_move(
        &english(),
        Some("cat"),
        LanguageMode::Secondary,
        &used,
        BotPolicy::Uniform,
        &mut rng,
    )
    .expect("Bot failed");

    match result {
        BotResult::Played { word, is_terminal } => {
            assert_eq!(word.text(), "tiger");
            // "rat" still answers "tiger".
            assert!(!is_terminal);
        }
        other => panic!("Expected a move, got {:?}", other),
    }
}

#[test]
fn test_bot_reports_checkmate() {
    let used: UsedWords = ["cat", "tiger"].into_iter().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let result = select_bot_move(
        &english(),
        Some("tiger"),
        LanguageMode::Secondary,
        &used,
        BotPolicy::Uniform,
        &mut rng,
    )
    .expect("Bot failed");

    match result {
        BotResult::Played { word, is_terminal } => {
            assert_eq!(word.text(), "rat");
            assert!(is_terminal, "Nothing unused starts with \"t\"");
        }
        other => panic!("Expected a move, got {:?}", other),
    }
}

#[test]
fn test_bot_choice_is_member_and_unused() {
    let lexicon = MemoryLexicon::new().with_words(
        LanguageMode::Primary,
        ["con mèo", "mèo béo", "mèo mun", "mèo con", "mèo rừng", "chó vàng"],
    );
    let used: UsedWords = ["con mèo", "mèo béo"].into_iter().collect();

    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = select_bot_move(
            &lexicon,
            Some("con mèo"),
            LanguageMode::Primary,
            &used,
            BotPolicy::Uniform,
            &mut rng,
        )
        .expect("Bot failed");

        let BotResult::Played { word, .. } = result else {
            panic!("Bot should always find a word");
        };
        assert!(!used.contains(word.text()), "Bot repeated {}", word);
        let start = derive_start_key(word.text(), LanguageMode::Primary).expect("Start key");
        assert_eq!(start.as_str(), "mèo");
    }
}

#[test]
fn test_bot_opening_draws_from_whole_partition() {
    let lexicon = english().with_words(LanguageMode::Primary, ["con mèo"]);
    let used: UsedWords = ["cat"].into_iter().collect();

    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = select_bot_move(
            &lexicon,
            None,
            LanguageMode::Secondary,
            &used,
            BotPolicy::Uniform,
            &mut rng,
        )
        .expect("Bot failed");

        let BotResult::Played { word, .. } = result else {
            panic!("Bot should open");
        };
        assert!(["tiger", "rat"].contains(&word.text().as_str()));
    }
}

#[test]
fn test_bot_is_deterministic_for_a_seed() {
    let lexicon = MemoryLexicon::new().with_words(
        LanguageMode::Secondary,
        ["cat", "tab", "tan", "tap", "tar", "tax", "tea", "ten"],
    );
    let used: UsedWords = ["cat"].into_iter().collect();

    let pick = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        select_bot_move(
            &lexicon,
            Some("cat"),
            LanguageMode::Secondary,
            &used,
            BotPolicy::Uniform,
            &mut rng,
        )
        .expect("Bot failed")
    };
    assert_eq!(pick(42), pick(42));
}

#[test]
fn test_seek_checkmate_prefers_terminal_word() {
    // After "cat": "tiger" can be answered by "rat", "tux" cannot be answered.
    let lexicon =
        MemoryLexicon::new().with_words(LanguageMode::Secondary, ["cat", "tiger", "rat", "tux"]);
    let used: UsedWords = ["cat"].into_iter().collect();
    let policy = BotPolicy::SeekCheckmate { samples: 64 };

    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = select_bot_move(
            &lexicon,
            Some("cat"),
            LanguageMode::Secondary,
            &used,
            policy,
            &mut rng,
        )
        .expect("Bot failed");

        let BotResult::Played { word, is_terminal } = result else {
            panic!("Bot should find a word");
        };
        assert_eq!(word.text(), "tux");
        assert!(is_terminal);
    }
}

#[test]
fn test_seek_checkmate_falls_back_to_non_terminal_word() {
    let used: UsedWords = ["cat"].into_iter().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let result = select_bot_move(
        &english(),
        Some("cat"),
        LanguageMode::Secondary,
        &used,
        BotPolicy::SeekCheckmate { samples: 5 },
        &mut rng,
    )
    .expect("Bot failed");
    assert_eq!(
        result,
        BotResult::Played {
            word: word_chain::Word::new("tiger", LanguageMode::Secondary),
            is_terminal: false,
        }
    );
}

#[test]
fn test_policy_from_samples() {
    assert_eq!(BotPolicy::from_samples(0), BotPolicy::Uniform);
    assert_eq!(BotPolicy::from_samples(1), BotPolicy::Uniform);
    assert_eq!(
        BotPolicy::from_samples(8),
        BotPolicy::SeekCheckmate { samples: 8 }
    );
}

#[test]
fn test_bot_never_plays_single_token_primary_reply() {
    let lexicon = MemoryLexicon::new().with_words(LanguageMode::Primary, ["con mèo", "mèo"]);
    let used: UsedWords = ["con mèo"].into_iter().collect();

    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = select_bot_move(
            &lexicon,
            Some("con mèo"),
            LanguageMode::Primary,
            &used,
            BotPolicy::Uniform,
            &mut rng,
        )
        .expect("Bot failed");
        assert_eq!(result, BotResult::NoWordAvailable);
    }
}

#[test]
fn test_bot_reply_is_always_a_legal_move() {
    let lexicon = MemoryLexicon::new()
        .with_words(LanguageMode::Primary, ["con mèo", "mèo", "mèo béo", "béo"]);
    let used: UsedWords = ["con mèo"].into_iter().collect();

    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let BotResult::Played { word, .. } = select_bot_move(
            &lexicon,
            Some("con mèo"),
            LanguageMode::Primary,
            &used,
            BotPolicy::Uniform,
            &mut rng,
        )
        .expect("Bot failed") else {
            panic!("\"mèo béo\" is available");
        };
        let outcome = word_chain::validate_move(
            &lexicon,
            word.text(),
            Some("con mèo"),
            LanguageMode::Primary,
            &used,
        )
        .expect("Validation failed");
        assert!(outcome.is_legal(), "Bot played {} which the player could not", word);
    }
}
