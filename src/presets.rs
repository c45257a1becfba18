//! Named backend shortcuts for the `--player-one` / `--player-two` flags.

use crate::llm_client::LlmProvider;
use crate::match_config::{PlayerConfig, PlayerKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A ready-made player configuration selectable by name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModelPreset {
    /// GLM-5 on Ollama cloud.
    Zai,
    /// Nemotron 3 Nano on Ollama cloud.
    Nvidia,
    /// Mistral Large 3 on Ollama cloud.
    Mistral,
    /// gpt-oss 120b on Ollama cloud.
    OpenAI,
    /// Gemini 3 Flash preview on Ollama cloud.
    Gemini,
    /// Sarvam-M via the Sarvam API.
    Sarvam,
    /// MiniMax M2.5 on Ollama cloud.
    Minimax,
    /// DeepSeek v3.2 on Ollama cloud.
    #[default]
    Deepseek,
    /// Offline player that takes the first empty square.
    Simple,
}

impl ModelPreset {
    /// Provider and model behind this preset, `None` for offline players.
    pub fn backend(self) -> Option<(LlmProvider, &'static str)> {
        let ollama = |model| Some((LlmProvider::Ollama, model));
        match self {
            ModelPreset::Zai => ollama("glm-5:cloud"),
            ModelPreset::Nvidia => ollama("nemotron-3-nano:30b-cloud"),
            ModelPreset::Mistral => ollama("mistral-large-3:675b-cloud"),
            ModelPreset::OpenAI => ollama("gpt-oss:120b-cloud"),
            ModelPreset::Gemini => ollama("gemini-3-flash-preview:cloud"),
            ModelPreset::Minimax => ollama("minimax-m2.5:cloud"),
            ModelPreset::Deepseek => ollama("deepseek-v3.2:cloud"),
            ModelPreset::Sarvam => Some((LlmProvider::Sarvam, "sarvam-m")),
            ModelPreset::Simple => None,
        }
    }

    /// Builds the player configuration for this preset.
    #[instrument]
    pub fn player_config(self) -> PlayerConfig {
        let name = self.to_string();
        match self.backend() {
            Some((provider, model)) => {
                let config = PlayerConfig::llm(name, provider, model.to_string());
                match self {
                    ModelPreset::Sarvam => config.with_temperature(0.3),
                    _ => config,
                }
            }
            None => PlayerConfig::offline(name, PlayerKind::Simple),
        }
    }
}
