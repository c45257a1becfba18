//! Candidate moves and the reasons they get rejected.
//!
//! A [`Move`] is what a move source proposes: a raw `(row, col)` pair that
//! may be anything a parser pulled out of a reply. It only becomes a
//! [`Position`] once the rules have validated it.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A proposed move: a row and column, each expected to be in `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Row index as supplied by the source.
    pub row: i64,
    /// Column index as supplied by the source.
    pub col: i64,
}

impl From<Position> for Move {
    fn from(pos: Position) -> Self {
        Self::new(pos.row() as i64, pos.col() as i64)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Row or column outside `0..=2`.
    #[display("Move {} is off the board (row and column must be 0-2)", _0)]
    OutOfBounds(Move),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied by {}", _0, _1)]
    SquareOccupied(Position, Player),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
