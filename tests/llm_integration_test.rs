//! Integration test for LLM client connectivity.

use llm_tictactoe::{
    LlmClient, LlmConfig, LlmPlayer, LlmProvider, MatchConfig, ModelPreset, Orchestrator,
    SimpleAI, TelemetryConfig, console,
};
use tracing::instrument;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_ollama_cloud_connectivity() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OLLAMA_API_KEY").expect("OLLAMA_API_KEY not set");
    let config = LlmConfig::new(
        LlmProvider::Ollama,
        Some(api_key),
        "gpt-oss:120b-cloud".to_string(),
    )
    .with_max_tokens(50);

    let client = LlmClient::new(config).expect("Failed to build client");
    let completion = client
        .generate("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to generate");

    assert!(!completion.text.is_empty(), "Response should not be empty");
    eprintln!("Response: {} ({} tokens)", completion.text, completion.tokens);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_sarvam_connectivity() {
    dotenvy::dotenv().ok();

    let config = ModelPreset::Sarvam
        .player_config()
        .create_llm_config()
        .expect("SARVAM_API_KEY not set");
    let client = LlmClient::new(config).expect("Failed to build client");
    let completion = client
        .generate("You are a helpful assistant.", "Reply with 1,1 and nothing else.")
        .await
        .expect("Failed to generate");

    assert!(completion.tokens > 0, "Sarvam should report usage");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_model_finishes_game_against_offline_player() {
    dotenvy::dotenv().ok();

    let config = ModelPreset::Deepseek
        .player_config()
        .create_llm_config()
        .expect("Failed to create LLM config");
    let model = LlmPlayer::new("deepseek".to_string(), config).expect("Failed to build player");

    let mut orchestrator = Orchestrator::new(Box::new(model), Box::new(SimpleAI::new("simple")));
    let outcome = orchestrator.run().await;

    eprintln!("Outcome: {}", outcome);
    assert!(orchestrator.state().is_over());
    assert!(orchestrator.state().usage().o > 0);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_console_duel() {
    dotenvy::dotenv().ok();

    let config = MatchConfig::new(
        ModelPreset::Minimax.player_config(),
        ModelPreset::Simple.player_config(),
    )
    .with_telemetry(TelemetryConfig::disabled());

    let outcome = console::run_duel(&config).await.expect("Duel failed");
    eprintln!("Outcome: {}", outcome);
}
