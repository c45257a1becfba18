//! Match configuration: who plays each side, the retry budget, and telemetry.
//!
//! Loaded from TOML, with every field optional:
//!
//! ```toml
//! max_attempts = 3
//!
//! [player_one]
//! name = "minimax"
//! provider = "ollama"
//! model = "minimax-m2.5:cloud"
//!
//! [player_two]
//! name = "sarvam"
//! provider = "sarvam"
//! model = "sarvam-m"
//! temperature = 0.3
//!
//! [telemetry]
//! enabled = true
//! host = "https://cloud.langfuse.com"
//! ```

use crate::llm_client::{LlmConfig, LlmProvider};
use crate::orchestrator::DEFAULT_MAX_ATTEMPTS;
use crate::presets::ModelPreset;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// How a side produces moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Prompts a hosted model.
    #[default]
    Llm,
    /// Offline first-empty-square player.
    Simple,
}

/// Configuration for one side of the board.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name (used in logs, events and the final summary).
    name: String,

    /// How moves are produced.
    #[serde(default)]
    kind: PlayerKind,

    /// LLM provider.
    #[serde(default)]
    provider: LlmProvider,

    /// Model name as the provider knows it.
    #[serde(default = "default_model")]
    model: String,

    /// Override for the provider's base URL.
    #[serde(default)]
    base_url: Option<String>,

    /// Maximum tokens for each reply.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Sampling temperature.
    #[serde(default)]
    temperature: Option<f32>,
}

fn default_model() -> String {
    ModelPreset::default()
        .backend()
        .map(|(_, model)| model.to_string())
        .unwrap_or_default()
}

fn default_max_tokens() -> u32 {
    LlmConfig::DEFAULT_MAX_TOKENS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl PlayerConfig {
    /// Creates an LLM-backed player configuration.
    #[instrument(skip(name, model), fields(player = %name, model = %model))]
    pub fn llm(name: String, provider: LlmProvider, model: String) -> Self {
        Self {
            name,
            kind: PlayerKind::Llm,
            provider,
            model,
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }

    /// Creates a player configuration that needs no backend.
    pub fn offline(name: String, kind: PlayerKind) -> Self {
        Self {
            kind,
            ..Self::llm(name, LlmProvider::default(), String::new())
        }
    }

    /// Returns a copy with the given temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Returns a copy pointed at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Creates the LLM client configuration for this player.
    ///
    /// Reads the provider's API key from the environment (`OLLAMA_API_KEY`,
    /// `OPENAI_API_KEY`, `ANTHROPIC_API_KEY` or `SARVAM_API_KEY`). Ollama may
    /// run without a key.
    #[instrument(skip(self), fields(player = %self.name, provider = %self.provider, model = %self.model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let var = self.provider.api_key_var();
        let api_key = match std::env::var(var) {
            Ok(key) if !key.is_empty() => Some(key),
            _ if self.provider.key_optional() => None,
            _ => {
                return Err(ConfigError::new(format!(
                    "{} environment variable not set",
                    var
                )));
            }
        };

        let mut config = LlmConfig::new(self.provider, api_key, self.model.clone())
            .with_max_tokens(self.max_tokens);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        Ok(config)
    }
}

/// Telemetry sink settings.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Send per-move events when credentials are available.
    #[serde(default = "default_telemetry_enabled")]
    enabled: bool,

    /// Ingestion host; falls back to `LANGFUSE_HOST`, then the public cloud.
    #[serde(default)]
    host: Option<String>,
}

fn default_telemetry_enabled() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_telemetry_enabled(),
            host: None,
        }
    }
}

impl TelemetryConfig {
    /// Returns a copy with telemetry switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            host: None,
        }
    }

    /// Returns a copy pointed at a specific host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}

/// Full configuration of one match.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// First mover (plays O).
    #[serde(default = "default_player_one")]
    player_one: PlayerConfig,

    /// Second mover (plays X).
    #[serde(default = "default_player_two")]
    player_two: PlayerConfig,

    /// Attempts a side gets per turn before it forfeits.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Telemetry sink.
    #[serde(default)]
    telemetry: TelemetryConfig,
}

fn default_player_one() -> PlayerConfig {
    ModelPreset::Minimax.player_config()
}

fn default_player_two() -> PlayerConfig {
    ModelPreset::Sarvam.player_config()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_one: default_player_one(),
            player_two: default_player_two(),
            max_attempts: default_max_attempts(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Creates a configuration from two players and default settings.
    pub fn new(player_one: PlayerConfig, player_two: PlayerConfig) -> Self {
        Self {
            player_one,
            player_two,
            ..Self::default()
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(
            player_one = %config.player_one.name,
            player_two = %config.player_two.name,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the first mover.
    pub fn with_player_one(mut self, player: PlayerConfig) -> Self {
        self.player_one = player;
        self
    }

    /// Replaces the second mover.
    pub fn with_player_two(mut self, player: PlayerConfig) -> Self {
        self.player_two = player;
        self
    }

    /// Sets the per-turn retry budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Result<Self, ConfigError> {
        self.max_attempts = max_attempts;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the telemetry settings.
    pub fn with_telemetry(mut self, telemetry: TelemetryConfig) -> Self {
        self.telemetry = telemetry;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::new(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
