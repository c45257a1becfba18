//! LLM API client abstraction for Ollama, OpenAI-compatible hosts, Anthropic and Sarvam.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// LLM provider selection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// Ollama native chat API (local server or ollama.com cloud).
    #[default]
    Ollama,
    /// OpenAI or any OpenAI-compatible `/chat/completions` host.
    OpenAI,
    /// Anthropic messages API.
    Anthropic,
    /// Sarvam AI chat completions.
    Sarvam,
}

impl LlmProvider {
    /// Base URL used when the configuration does not name one.
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::Ollama => "https://ollama.com",
            LlmProvider::OpenAI => "https://api.openai.com/v1",
            LlmProvider::Anthropic => "https://api.anthropic.com",
            LlmProvider::Sarvam => "https://api.sarvam.ai/v1",
        }
    }

    /// Environment variable holding the API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Ollama => "OLLAMA_API_KEY",
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::Sarvam => "SARVAM_API_KEY",
        }
    }

    /// Whether requests can go out without a key (a local Ollama server).
    pub fn key_optional(self) -> bool {
        matches!(self, LlmProvider::Ollama)
    }
}

/// Configuration for LLM client.
#[derive(Clone, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct LlmConfig {
    #[setters(skip)]
    provider: LlmProvider,
    #[getter(skip)]
    #[setters(skip)]
    api_key: Option<String>,
    #[setters(skip)]
    model: String,
    base_url: String,
    max_tokens: u32,
    #[setters(strip_option)]
    temperature: Option<f32>,
    timeout: Duration,
}

impl LlmConfig {
    /// Default completion budget.
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;

    /// Creates a new LLM configuration with the provider's default base URL.
    #[instrument(skip(api_key), fields(provider = %provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: Option<String>, model: String) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            base_url: provider.default_base_url().to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: None,
            timeout: Duration::from_secs(60),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Reply text and the tokens the backend charged for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Assistant reply.
    pub text: String,
    /// Total tokens (prompt + completion) reported by the backend, 0 if none.
    pub tokens: u64,
}

impl Completion {
    /// Extracts the reply and usage from a provider's JSON response body.
    #[instrument(skip(body))]
    pub fn from_response(provider: LlmProvider, body: &Value) -> Result<Self, LlmError> {
        let (text, tokens) = match provider {
            LlmProvider::Ollama => (
                body["message"]["content"].as_str(),
                body["prompt_eval_count"].as_u64().unwrap_or(0)
                    + body["eval_count"].as_u64().unwrap_or(0),
            ),
            LlmProvider::OpenAI | LlmProvider::Sarvam => (
                body["choices"][0]["message"]["content"].as_str(),
                body["usage"]["total_tokens"].as_u64().unwrap_or(0),
            ),
            LlmProvider::Anthropic => (
                body["content"][0]["text"].as_str(),
                body["usage"]["input_tokens"].as_u64().unwrap_or(0)
                    + body["usage"]["output_tokens"].as_u64().unwrap_or(0),
            ),
        };

        let text = text.ok_or_else(|| {
            error!(response = %body, "No text content in response");
            LlmError::new(format!("No text content in {} response", provider))
        })?;

        Ok(Self {
            text: text.to_string(),
            tokens,
        })
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = %config.provider, model = %config.model))]
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        info!("Creating LLM client");
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion from a system prompt and user message.
    #[instrument(skip(self, system_prompt, user_message), fields(provider = %self.config.provider, model = %self.config.model))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, LlmError> {
        debug!("Generating completion");
        let request = match self.config.provider {
            LlmProvider::Ollama => self.ollama_request(system_prompt, user_message),
            LlmProvider::OpenAI | LlmProvider::Sarvam => {
                self.chat_completions_request(system_prompt, user_message)
            }
            LlmProvider::Anthropic => self.anthropic_request(system_prompt, user_message),
        };

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "LLM request failed");
            LlmError::new(format!("{} request failed: {}", self.config.provider, e))
        })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read LLM response");
            LlmError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "LLM API error");
            return Err(LlmError::new(format!(
                "{} API error {}: {}",
                self.config.provider, status, response_text
            )));
        }

        debug!(response_length = response_text.len(), "Parsing LLM response");
        let body: Value = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = ?e, response = %response_text, "Failed to parse LLM response");
            LlmError::new(format!("Failed to parse response: {}", e))
        })?;

        let completion = Completion::from_response(self.config.provider, &body)?;
        info!(
            content_length = completion.text.len(),
            tokens = completion.tokens,
            "Generated completion"
        );
        Ok(completion)
    }

    fn ollama_request(&self, system_prompt: &str, user_message: &str) -> reqwest::RequestBuilder {
        let mut options = json!({ "num_predict": self.config.max_tokens });
        if let Some(temperature) = self.config.temperature {
            options["temperature"] = json!(temperature);
        }
        let body = json!({
            "model": self.config.model,
            "stream": false,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message }
            ],
            "options": options
        });

        let request = self.http.post(self.config.endpoint("api/chat")).json(&body);
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn chat_completions_request(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> reqwest::RequestBuilder {
        let mut body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message }
            ]
        });
        if let Some(temperature) = self.config.temperature {
            body["temperature"] = json!(temperature);
        }

        let request = self
            .http
            .post(self.config.endpoint("chat/completions"))
            .json(&body);
        match (&self.config.api_key, self.config.provider) {
            (Some(key), LlmProvider::Sarvam) => request.header("api-subscription-key", key),
            (Some(key), _) => request.bearer_auth(key),
            (None, _) => request,
        }
    }

    fn anthropic_request(&self, system_prompt: &str, user_message: &str) -> reqwest::RequestBuilder {
        let mut body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system_prompt,
            "messages": [
                { "role": "user", "content": user_message }
            ]
        });
        if let Some(temperature) = self.config.temperature {
            body["temperature"] = json!(temperature);
        }

        self.http
            .post(self.config.endpoint("v1/messages"))
            .header("x-api-key", self.config.api_key.clone().unwrap_or_default())
            .header("anthropic-version", "2023-06-01")
            .json(&body)
    }
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
