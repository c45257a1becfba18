//! Move sources: whatever supplies the next move for one side.

mod human;
mod llm;
pub mod prompt;
mod simple_ai;

pub use human::HumanPlayer;
pub use llm::LlmPlayer;
pub use simple_ai::SimpleAI;

use crate::games::tictactoe::{Board, Move, Player};
use crate::match_config::{ConfigError, PlayerConfig, PlayerKind};
use derive_more::{Display, Error};
use tracing::instrument;

/// What the turn loop hands a move source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Board as it stands.
    pub board: Board,
    /// Mark the source is playing.
    pub mark: Player,
    /// 1-based attempt number within this turn.
    pub attempt: u32,
    /// Why the previous attempt this turn was refused, if it was.
    pub rejection: Option<String>,
}

/// A candidate move and what it cost to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReply {
    /// Proposed move, not yet validated.
    pub candidate: Move,
    /// Tokens the backend charged for this reply.
    pub tokens: u64,
}

impl MoveReply {
    /// A reply that cost nothing (human and offline players).
    pub fn free(candidate: Move) -> Self {
        Self {
            candidate,
            tokens: 0,
        }
    }
}

/// Why a move source produced no candidate.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SourceError {
    /// The reply held no `row,col` pair.
    #[display("Could not read a move from reply {:?}", reply)]
    Unparsable {
        /// Raw reply text.
        reply: String,
        /// Tokens the backend charged anyway.
        tokens: u64,
    },

    /// The backend could not be reached or returned an error.
    #[display("Move source unavailable: {}", _0)]
    Unavailable(#[error(not(source))] String),

    /// The source will never produce another move.
    #[display("Move source closed")]
    Closed,
}

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// Asks for the next move.
    async fn request_move(&mut self, request: &MoveRequest) -> Result<MoveReply, SourceError>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Builds the automated move source described by a player configuration.
#[instrument(skip(config), fields(player = %config.name()))]
pub fn from_config(config: &PlayerConfig) -> Result<Box<dyn MoveSource>, ConfigError> {
    match config.kind() {
        PlayerKind::Llm => {
            let llm_config = config.create_llm_config()?;
            let player = LlmPlayer::new(config.name().clone(), llm_config)
                .map_err(|e| ConfigError::new(e.to_string()))?;
            Ok(Box::new(player))
        }
        PlayerKind::Simple => Ok(Box::new(SimpleAI::new(config.name().clone()))),
    }
}
