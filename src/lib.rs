//! LLM Tic-Tac-Toe library - rules, move sources and game orchestration
//!
//! A tic-tac-toe game whose moves come from a human in the terminal or from
//! hosted language models prompted with the board.
//!
//! # Architecture
//!
//! - **Games**: board, rules engine and the turn state machine
//! - **Players**: move sources (human input, LLM, offline)
//! - **Orchestrator**: turn loop with per-turn retry budget and forfeits
//! - **LLM client**: Ollama, OpenAI, Anthropic and Sarvam chat APIs
//! - **Telemetry**: optional per-move trace events
//!
//! # Example
//!
//! ```no_run
//! use llm_tictactoe::{Orchestrator, SimpleAI};
//!
//! # async fn example() {
//! let mut orchestrator = Orchestrator::new(
//!     Box::new(SimpleAI::new("first")),
//!     Box::new(SimpleAI::new("second")),
//! );
//! let outcome = orchestrator.run().await;
//! println!("{}", outcome);
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod console;
pub mod games;
mod llm_client;
mod match_config;
mod orchestrator;
pub mod players;
mod presets;
pub mod telemetry;
pub mod tui;

// Crate-level exports - Configuration
pub use match_config::{ConfigError, MatchConfig, PlayerConfig, PlayerKind, TelemetryConfig};
pub use presets::ModelPreset;

// Crate-level exports - LLM client
pub use llm_client::{Completion, LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Orchestration
pub use orchestrator::{DEFAULT_MAX_ATTEMPTS, GameEvent, Orchestrator};

// Crate-level exports - Players
pub use players::{
    HumanPlayer, LlmPlayer, MoveReply, MoveRequest, MoveSource, SimpleAI, SourceError,
};

// Crate-level exports - Telemetry
pub use telemetry::{HttpTraceSink, MoveTrace, Telemetry};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, ForfeitReason, GameState, GameStatus, Move, MoveError, Outcome, Phase, Player,
    Position, Square, TokenUsage,
};
