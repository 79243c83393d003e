//! Tests for linking-key derivation.

use proptest::prelude::*;
use strum::IntoEnumIterator;
use word_chain::{LanguageMode, WordChainError, derive_key, derive_start_key};

#[test]
fn test_secondary_key_is_last_character() {
    let key = derive_key("cat", LanguageMode::Secondary).expect("Derivation failed");
    assert_eq!(key.as_str(), "t");
}

#[test]
fn test_secondary_key_normalizes_input() {
    let key = derive_key("  TigeR  ", LanguageMode::Secondary).expect("Derivation failed");
    assert_eq!(key.as_str(), "r");
}

#[test]
fn test_secondary_key_handles_multibyte_characters() {
    let key = derive_key("café", LanguageMode::Secondary).expect("Derivation failed");
    assert_eq!(key.as_str(), "é");
}

#[test]
fn test_primary_key_is_last_token() {
    let key = derive_key("con mèo", LanguageMode::Primary).expect("Derivation failed");
    assert_eq!(key.as_str(), "mèo");
}

#[test]
fn test_primary_key_without_spaces_is_whole_word() {
    let key = derive_key("mèo", LanguageMode::Primary).expect("Derivation failed");
    assert_eq!(key.as_str(), "mèo");
}

#[test]
fn test_primary_key_skips_empty_segments() {
    let key = derive_key("con  mèo", LanguageMode::Primary).expect("Derivation failed");
    assert_eq!(key.as_str(), "mèo");
}

#[test]
fn test_empty_word_is_invalid() {
    for mode in LanguageMode::iter() {
        assert!(matches!(derive_key("", mode), Err(WordChainError::InvalidWord)));
        assert!(matches!(derive_key("   ", mode), Err(WordChainError::InvalidWord)));
    }
}

#[test]
fn test_start_key_matches_linking_key_of_predecessor() {
    let key = derive_key("con mèo", LanguageMode::Primary).expect("Derivation failed");
    let start = derive_start_key("mèo béo", LanguageMode::Primary).expect("Derivation failed");
    assert_eq!(key, start);
}

proptest! {
    #[test]
    fn prop_secondary_key_is_last_char(word in "[a-z]{1,12}") {
        let key = derive_key(&word, LanguageMode::Secondary).unwrap();
        let last = word.chars().last().unwrap().to_string();
        prop_assert_eq!(key.as_str(), last.as_str());
    }

    #[test]
    fn prop_primary_key_is_last_token(first in "[a-z]{1,6}", second in "[a-z]{1,6}") {
        let word = format!("{first} {second}");
        let key = derive_key(&word, LanguageMode::Primary).unwrap();
        prop_assert_eq!(key.as_str(), second.as_str());
    }

    #[test]
    fn prop_derivation_is_deterministic(word in "[a-z ]{0,16}") {
        for mode in LanguageMode::iter() {
            let a = derive_key(&word, mode).ok();
            let b = derive_key(&word, mode).ok();
            prop_assert_eq!(a, b);
        }
    }
}

#[test]
fn test_modes_parse_from_wire_names() {
    let names: Vec<String> = LanguageMode::iter().map(|m| m.to_string()).collect();
    assert_eq!(names, ["primary", "secondary"]);
    assert_eq!("vn".parse::<LanguageMode>().ok(), Some(LanguageMode::Primary));
    assert_eq!("EN".parse::<LanguageMode>().ok(), Some(LanguageMode::Secondary));
}
