//! Turn phases and terminal outcomes.

use super::{GameStatus, Player};
use serde::{Deserialize, Serialize};

/// Why a side lost by forfeit rather than on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForfeitReason {
    /// Every attempt in the retry budget was unparsable or illegal.
    InvalidMoves {
        /// Attempts consumed before giving up.
        attempts: u32,
    },
    /// The backend failed on the final attempt.
    SourceUnavailable(String),
    /// The move source went away (human closed the interface).
    Abandoned,
}

impl std::fmt::Display for ForfeitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForfeitReason::InvalidMoves { attempts } => {
                write!(f, "no legal move after {} attempts", attempts)
            }
            ForfeitReason::SourceUnavailable(message) => {
                write!(f, "move source unavailable: {}", message)
            }
            ForfeitReason::Abandoned => write!(f, "player left the game"),
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player completed a line.
    Winner(Player),
    /// Board filled with no line.
    Draw,
    /// A side stopped producing legal moves. Names no winner.
    Forfeit {
        /// The side that forfeited.
        player: Player,
        /// What went wrong.
        reason: ForfeitReason,
    },
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw | Outcome::Forfeit { .. } => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// Returns true if the game was aborted by a forfeit.
    pub fn is_forfeit(&self) -> bool {
        matches!(self, Outcome::Forfeit { .. })
    }

    /// Converts a terminal board status into an outcome.
    ///
    /// Returns `None` for [`GameStatus::InProgress`].
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(Outcome::Winner(player)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Forfeit { player, reason } => {
                write!(f, "Player {} forfeits: {}", player, reason)
            }
        }
    }
}

/// Where the turn loop stands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for this player's move.
    Turn(Player),
    /// Game over. Absorbing.
    Terminal(Outcome),
}

impl Phase {
    /// The player to move, if the game is not over.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            Phase::Turn(player) => Some(*player),
            Phase::Terminal(_) => None,
        }
    }

    /// The outcome, if the game is over.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Phase::Turn(_) => None,
            Phase::Terminal(outcome) => Some(outcome),
        }
    }

    /// Returns true once the game is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }
}
