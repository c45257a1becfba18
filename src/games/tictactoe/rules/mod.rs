//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here knows whose turn it is or
//! where moves come from; the turn loop in [`super::game`] composes these.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use super::{Board, GameStatus, Move, MoveError, Player, Position, Square};
use tracing::{debug, instrument};

/// Checks a candidate move against the board.
///
/// Returns the in-range [`Position`] on success. Rejects coordinates outside
/// `0..=2` and occupied cells. Has no side effects.
#[instrument(skip(board), fields(candidate = %candidate))]
pub fn validate(board: &Board, candidate: Move) -> Result<Position, MoveError> {
    let pos = Position::from_coords(candidate.row, candidate.col)
        .ok_or(MoveError::OutOfBounds(candidate))?;

    match board.get(pos) {
        Square::Empty => Ok(pos),
        Square::Occupied(owner) => {
            debug!(%pos, %owner, "Rejecting move onto occupied square");
            Err(MoveError::SquareOccupied(pos, owner))
        }
    }
}

/// Returns a copy of the board with `pos` set to `player`'s mark.
///
/// The caller is expected to have run [`validate`] first; only the targeted
/// cell changes.
pub fn apply(board: &Board, pos: Position, player: Player) -> Board {
    let mut next = *board;
    next.set(pos, Square::Occupied(player));
    next
}

/// Computes the status of the board.
///
/// A completed line wins; otherwise a full board is a draw.
#[instrument(skip(board))]
pub fn terminal_status(board: &Board) -> GameStatus {
    if let Some(player) = check_winner(board) {
        GameStatus::Won(player)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
