//! Invariants of the turn state machine.
//!
//! Checked in debug builds after every accepted move and exercised directly
//! by tests.

use super::{Board, GameState, Player, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Returns the descriptions of every violated invariant.
    fn check_all(state: &S) -> Result<(), Vec<&'static str>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<&'static str>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(I1::description());
        }
        if !I2::holds(state) {
            violations.push(I2::description());
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: squares are never overwritten, and every mark on the board
/// was placed by exactly one recorded move.
pub struct MonotonicBoard;

impl Invariant<GameState> for MonotonicBoard {
    fn holds(state: &GameState) -> bool {
        let mut replayed = Board::new();
        for placed in state.history() {
            if !replayed.is_empty(placed.position) {
                return false;
            }
            replayed.set(placed.position, Square::Occupied(placed.player));
        }
        replayed == *state.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic and match the move history"
    }
}

/// Invariant: players alternate, starting with [`Player::FIRST`].
pub struct AlternatingTurn;

impl Invariant<GameState> for AlternatingTurn {
    fn holds(state: &GameState) -> bool {
        let mut expected = Player::FIRST;
        for placed in state.history() {
            if placed.player != expected {
                return false;
            }
            expected = expected.opponent();
        }
        match state.to_move() {
            Some(next) => next == expected,
            None => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns starting with O"
    }
}

/// All invariants of [`GameState`].
pub type GameInvariants = (MonotonicBoard, AlternatingTurn);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Move;

    #[test]
    fn test_new_game_holds() {
        assert!(GameInvariants::check_all(&GameState::new()).is_ok());
    }

    #[test]
    fn test_holds_after_moves_and_rejections() {
        let mut state = GameState::new();
        state.accept(Move::new(1, 1)).unwrap();
        assert!(state.accept(Move::new(1, 1)).is_err());
        state.accept(Move::new(0, 0)).unwrap();
        assert!(GameInvariants::check_all(&state).is_ok());
    }
}
