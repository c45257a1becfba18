//! Tests for TOML match configuration.

use llm_tictactoe::{DEFAULT_MAX_ATTEMPTS, LlmProvider, MatchConfig, ModelPreset, PlayerKind};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
max_attempts = 5

[player_one]
name = "local"
provider = "ollama"
model = "llama3.2"
base_url = "http://localhost:11434"

[player_two]
name = "claude"
provider = "anthropic"
model = "claude-haiku"
max_tokens = 64
temperature = 0.2

[telemetry]
enabled = false
"#,
    );

    let config = MatchConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.max_attempts(), 5);
    assert_eq!(config.player_one().name(), "local");
    assert_eq!(
        config.player_one().base_url().as_deref(),
        Some("http://localhost:11434")
    );
    assert_eq!(*config.player_two().provider(), LlmProvider::Anthropic);
    assert_eq!(*config.player_two().max_tokens(), 64);
    assert_eq!(*config.player_two().temperature(), Some(0.2));
    assert!(!config.telemetry().enabled());
}

#[test]
fn test_missing_fields_use_defaults() {
    let file = write_config(
        r#"
[player_two]
name = "offline"
kind = "simple"
"#,
    );

    let config = MatchConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    assert_eq!(config.player_one().name(), "minimax");
    assert_eq!(config.player_one().model(), "minimax-m2.5:cloud");
    assert_eq!(*config.player_two().kind(), PlayerKind::Simple);
    assert!(config.telemetry().enabled());
}

#[test]
fn test_zero_attempts_rejected() {
    let file = write_config("max_attempts = 0\n");
    assert!(MatchConfig::from_file(file.path()).is_err());
}

#[test]
fn test_malformed_toml_rejected() {
    let file = write_config("[player_one\nname = ");
    let err = MatchConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = MatchConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.player_one().name(), "minimax");
    assert_eq!(config.player_two().name(), "sarvam");
    assert_eq!(*config.player_two().provider(), LlmProvider::Sarvam);
    assert_eq!(*config.player_two().temperature(), Some(0.3));
}

#[test]
fn test_ollama_needs_no_key_for_local_server() {
    let player = ModelPreset::Deepseek
        .player_config()
        .with_base_url("http://localhost:11434");
    let llm = player.create_llm_config().unwrap();
    assert_eq!(llm.base_url(), "http://localhost:11434");
    assert_eq!(llm.model(), "deepseek-v3.2:cloud");
}

#[test]
fn test_presets_parse_case_insensitively() {
    assert_eq!("MiniMax".parse::<ModelPreset>().unwrap(), ModelPreset::Minimax);
    assert_eq!("openai".parse::<ModelPreset>().unwrap(), ModelPreset::OpenAI);
    assert!("gpt9".parse::<ModelPreset>().is_err());
    assert_eq!(ModelPreset::Simple.backend(), None);
    assert_eq!(*ModelPreset::Simple.player_config().kind(), PlayerKind::Simple);
}
