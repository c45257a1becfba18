//! Optional per-move trace events sent to an HTTP ingestion endpoint.
//!
//! Events use the Langfuse public ingestion API (`POST
//! /api/public/ingestion`, basic auth with a public/secret key pair). The
//! sink is best effort: the first failure logs a warning and switches it
//! off for the rest of the game.

use crate::games::tictactoe::{Outcome, Player, Position, TokenUsage};
use crate::match_config::TelemetryConfig;
use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Default ingestion host.
pub const DEFAULT_HOST: &str = "https://cloud.langfuse.com";

/// One accepted move.
#[derive(Debug, Clone, Serialize, derive_new::new)]
pub struct MoveTrace {
    /// 1-based move number.
    pub turn: usize,
    /// Who moved.
    pub player: Player,
    /// Display name of the move source.
    pub player_name: String,
    /// Where the mark went.
    pub position: Position,
    /// Board after the move, in prompt grid notation.
    pub board: String,
    /// Tokens spent on this turn, including rejected attempts.
    pub tokens: u64,
}

/// Telemetry failure. Never escapes [`Telemetry`].
#[derive(Debug, Clone, Display, Error)]
#[display("Telemetry error: {}", message)]
pub struct TelemetryError {
    /// Error message.
    pub message: String,
}

impl TelemetryError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Credentials and endpoint for the ingestion API.
#[derive(Debug, Clone)]
pub struct HttpTraceSink {
    http: reqwest::Client,
    host: String,
    public_key: String,
    secret_key: String,
}

impl HttpTraceSink {
    /// Creates a sink for `host`.
    pub fn new(
        host: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, TelemetryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TelemetryError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            host: host.into().trim_end_matches('/').to_string(),
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        })
    }

    /// Builds a sink from configuration and `LANGFUSE_*` environment variables.
    ///
    /// Returns `None` when disabled or when the keys are missing.
    #[instrument(skip(config))]
    pub fn from_env(config: &TelemetryConfig) -> Option<Self> {
        if !config.enabled() {
            debug!("Telemetry disabled by configuration");
            return None;
        }

        let (Ok(public_key), Ok(secret_key)) = (
            std::env::var("LANGFUSE_PUBLIC_KEY"),
            std::env::var("LANGFUSE_SECRET_KEY"),
        ) else {
            info!("LANGFUSE_PUBLIC_KEY / LANGFUSE_SECRET_KEY not set, tracing off");
            return None;
        };

        let host = config
            .host()
            .clone()
            .or_else(|| std::env::var("LANGFUSE_HOST").ok())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        match Self::new(host, public_key, secret_key) {
            Ok(sink) => Some(sink),
            Err(e) => {
                warn!(error = %e, "Telemetry sink unavailable, tracing off");
                None
            }
        }
    }

    /// Checks the credentials against the host.
    #[instrument(skip(self), fields(host = %self.host))]
    pub async fn auth_check(&self) -> Result<(), TelemetryError> {
        let response = self
            .http
            .get(format!("{}/api/public/projects", self.host))
            .basic_auth(&self.public_key, Some(&self.secret_key))
            .send()
            .await
            .map_err(|e| TelemetryError::new(format!("Auth check failed: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(TelemetryError::new(format!(
                "Auth check rejected with status {}",
                response.status()
            )))
        }
    }

    /// Sends one event.
    #[instrument(skip(self, body), fields(host = %self.host))]
    pub async fn send(
        &self,
        trace_id: Uuid,
        name: &str,
        timestamp: DateTime<Utc>,
        body: Value,
    ) -> Result<(), TelemetryError> {
        let payload = json!({
            "batch": [{
                "id": Uuid::new_v4(),
                "timestamp": timestamp,
                "type": "event-create",
                "body": {
                    "id": Uuid::new_v4(),
                    "traceId": trace_id,
                    "name": name,
                    "startTime": timestamp,
                    "metadata": body,
                }
            }]
        });

        let response = self
            .http
            .post(format!("{}/api/public/ingestion", self.host))
            .basic_auth(&self.public_key, Some(&self.secret_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| TelemetryError::new(format!("Ingestion request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TelemetryError::new(format!(
                "Ingestion rejected with status {}",
                response.status()
            )));
        }
        debug!(name, "Trace event sent");
        Ok(())
    }
}

/// Per-game telemetry handle.
///
/// Holds the trace id shared by every event of one game.
#[derive(Debug, Clone)]
pub struct Telemetry {
    trace_id: Uuid,
    sink: Option<HttpTraceSink>,
}

impl Telemetry {
    /// Telemetry that records nothing.
    pub fn disabled() -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            sink: None,
        }
    }

    /// Telemetry sending to `sink`.
    pub fn new(sink: HttpTraceSink) -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            sink: Some(sink),
        }
    }

    /// Builds telemetry from configuration, verifying credentials first.
    ///
    /// Any problem yields disabled telemetry.
    #[instrument(skip(config))]
    pub async fn connect(config: &TelemetryConfig) -> Self {
        let Some(sink) = HttpTraceSink::from_env(config) else {
            return Self::disabled();
        };
        match sink.auth_check().await {
            Ok(()) => {
                info!("Telemetry client is authenticated and ready");
                Self::new(sink)
            }
            Err(e) => {
                warn!(error = %e, "Telemetry authentication failed, tracing off");
                Self::disabled()
            }
        }
    }

    /// Identifier shared by all events of this game.
    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// Returns true while events are still being sent.
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Records an accepted move.
    pub async fn record_move(&mut self, trace: &MoveTrace) {
        let body = match serde_json::to_value(trace) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Could not serialize move trace");
                return;
            }
        };
        self.emit("move", body).await;
    }

    /// Records the end of the game.
    pub async fn record_outcome(&mut self, outcome: &Outcome, usage: &TokenUsage) {
        let body = json!({
            "outcome": outcome.to_string(),
            "winner": outcome.winner(),
            "tokens_o": usage.o,
            "tokens_x": usage.x,
        });
        self.emit("game_over", body).await;
    }

    async fn emit(&mut self, name: &str, body: Value) {
        let Some(sink) = &self.sink else {
            return;
        };
        let result = sink.send(self.trace_id, name, Utc::now(), body).await;
        if let Err(e) = result {
            warn!(error = %e, "Telemetry unavailable, continuing without tracing");
            self.sink = None;
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::disabled()
    }
}
