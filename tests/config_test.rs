//! Tests for configuration loading.

use std::collections::HashMap;
use std::io::Write;

use tempfile::NamedTempFile;
use word_chain::{AppConfig, BotPolicy};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.server().host(), "127.0.0.1");
    assert_eq!(*config.server().port(), 5000);
    assert_eq!(config.database().path(), "word_chain.db");
    assert_eq!(config.bot().policy(), BotPolicy::Uniform);
    assert_eq!(*config.seed().primary_segments(), 2);
    assert_eq!(*config.seed().secondary_limit(), 20_000);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = AppConfig::from_toml(
        r#"
        [server]
        port = 8080

        [bot]
        checkmate_samples = 16
        "#,
    )
    .expect("Config should parse");

    assert_eq!(config.server().host(), "127.0.0.1");
    assert_eq!(*config.server().port(), 8080);
    assert_eq!(config.bot().policy(), BotPolicy::SeekCheckmate { samples: 16 });
    assert_eq!(*config.seed().secondary_limit(), 20_000);
}

#[test]
fn test_invalid_toml_fails() {
    assert!(AppConfig::from_toml("[server]\nport = \"high\"").is_err());
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "[database]\npath = \"/tmp/lexicon.db\"").expect("Write failed");

    let config = AppConfig::from_file(file.path()).expect("Config should load");
    assert_eq!(config.database().path(), "/tmp/lexicon.db");
}

#[test]
fn test_missing_file_fails() {
    assert!(AppConfig::from_file("/definitely/not/here.toml").is_err());
}

#[test]
fn test_environment_overrides() {
    let mut config = AppConfig::default();
    config
        .apply_overrides(lookup(&[
            ("WORD_CHAIN_HOST", "0.0.0.0"),
            ("PORT", "7000"),
            ("DATABASE_URL", "game.db"),
            ("BOT_CHECKMATE_SAMPLES", "4"),
            ("BOT_SEED", "42"),
        ]))
        .expect("Overrides should apply");

    assert_eq!(config.server().host(), "0.0.0.0");
    assert_eq!(*config.server().port(), 7000);
    assert_eq!(config.database().path(), "game.db");
    assert_eq!(config.bot().policy(), BotPolicy::SeekCheckmate { samples: 4 });
    assert_eq!(*config.bot().seed(), Some(42));
}

#[test]
fn test_invalid_override_fails() {
    let mut config = AppConfig::default();
    let result = config.apply_overrides(lookup(&[("PORT", "not-a-port")]));
    assert!(result.is_err());
}

#[test]
fn test_flag_overrides() {
    let mut config = AppConfig::default();
    config.set_listen(None, Some(9000));
    config.set_db_path(Some("flag.db".to_string()));

    assert_eq!(config.server().host(), "127.0.0.1");
    assert_eq!(*config.server().port(), 9000);
    assert_eq!(config.database().path(), "flag.db");
}
