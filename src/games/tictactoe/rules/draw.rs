//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Square};

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::super::{GameStatus, Player, Position};
    use super::super::terminal_status;
    use super::*;

    fn board_from(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let square = match ch {
                    'X' => Square::Occupied(Player::X),
                    'O' => Square::Occupied(Player::O),
                    _ => Square::Empty,
                };
                let pos = Position::from_coords(r as i64, c as i64).unwrap();
                board.set(pos, square);
            }
        }
        board
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board = board_from(["...", ".X.", "..."]);
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let board = board_from(["XOX", "OXX", "OXO"]);
        assert!(is_full(&board));
        assert_eq!(terminal_status(&board), GameStatus::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        // X wins the left column even though the board is full
        let board = board_from(["XOO", "XXO", "XOX"]);
        assert!(is_full(&board));
        assert_eq!(terminal_status(&board), GameStatus::Won(Player::X));
    }
}
