//! Scenario tests for the turn state machine.

use llm_tictactoe::games::tictactoe::rules;
use llm_tictactoe::{
    Board, ForfeitReason, GameState, GameStatus, Move, MoveError, Outcome, Phase, Player,
    Position, Square,
};

fn play(game: &mut GameState, row: i64, col: i64) {
    game.accept(Move::new(row, col))
        .unwrap_or_else(|e| panic!("move ({},{}) rejected: {}", row, col, e));
}

#[test]
fn test_new_game_first_mover_is_o() {
    let game = GameState::new();
    assert_eq!(game.phase(), &Phase::Turn(Player::O));
    assert_eq!(game.to_move(), Some(Player::O));
    assert_eq!(game.last_player(), None);
    assert_eq!(game.board(), &Board::new());
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_first_mover_wins_top_row_on_move_five() {
    let mut game = GameState::new();
    play(&mut game, 0, 0); // O
    play(&mut game, 1, 0); // X
    play(&mut game, 0, 1); // O
    play(&mut game, 1, 1); // X
    assert!(!game.is_over());
    play(&mut game, 0, 2); // O

    assert_eq!(game.history().len(), 5);
    assert_eq!(game.status(), GameStatus::Won(Player::O));
    assert_eq!(game.outcome(), Some(&Outcome::Winner(Player::O)));
    assert_eq!(game.last_player(), Some(Player::O));
}

#[test]
fn test_listed_draw_sequence_ends_on_anti_diagonal() {
    // First mover (0,0),(0,2),(1,1),(2,0),(2,2) against (0,1),(1,0),(1,2),(2,1)
    // completes (0,2),(1,1),(2,0) on move 7, before the board fills.
    let sequence = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0)];
    let mut game = GameState::new();
    for (row, col) in sequence {
        play(&mut game, row, col);
    }

    assert_eq!(game.outcome(), Some(&Outcome::Winner(Player::O)));
    assert_eq!(game.board().marks_placed(), 7);
    assert_eq!(game.accept(Move::new(2, 2)), Err(MoveError::GameOver));
}

#[test]
fn test_draw_sequence_fills_board() {
    // O: (0,0) (0,2) (1,2) (2,0) (2,1)   X: (0,1) (1,1) (1,0) (2,2)
    let sequence = [
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 2),
        (1, 0),
        (2, 0),
        (2, 2),
        (2, 1),
    ];
    let mut game = GameState::new();
    for (row, col) in sequence {
        assert!(!game.is_over());
        play(&mut game, row, col);
    }

    assert_eq!(game.board().marks_placed(), 9);
    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.outcome(), Some(&Outcome::Draw));
}

#[test]
fn test_rejected_move_keeps_turn() {
    let mut game = GameState::new();
    play(&mut game, 1, 1);

    let before = game.clone();
    assert_eq!(
        game.accept(Move::new(1, 1)),
        Err(MoveError::SquareOccupied(Position::Center, Player::O))
    );
    assert_eq!(
        game.accept(Move::new(3, -1)),
        Err(MoveError::OutOfBounds(Move::new(3, -1)))
    );
    assert_eq!(game, before);
    assert_eq!(game.to_move(), Some(Player::X));
}

#[test]
fn test_terminal_is_absorbing() {
    let mut game = GameState::new();
    for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
        play(&mut game, row, col);
    }
    assert_eq!(game.accept(Move::new(2, 2)), Err(MoveError::GameOver));
    assert_eq!(game.history().len(), 5);

    game.forfeit(Player::X, ForfeitReason::Abandoned);
    assert_eq!(game.outcome(), Some(&Outcome::Winner(Player::O)));
}

#[test]
fn test_forfeit_names_no_winner() {
    let mut game = GameState::new();
    game.forfeit(Player::O, ForfeitReason::InvalidMoves { attempts: 3 });

    let outcome = game.outcome().cloned().unwrap();
    assert!(outcome.is_forfeit());
    assert_eq!(outcome.winner(), None);
    assert!(!outcome.is_draw());
    assert_eq!(game.accept(Move::new(0, 0)), Err(MoveError::GameOver));
}

#[test]
fn test_usage_counters_accumulate() {
    let mut game = GameState::new();
    game.record_usage(Player::O, 120);
    game.record_usage(Player::X, 30);
    game.record_usage(Player::O, 5);
    assert_eq!(game.usage().of(Player::O), 125);
    assert_eq!(game.usage().of(Player::X), 30);
}

#[test]
fn test_apply_changes_only_target_cell() {
    let mut board = Board::new();
    board.set(Position::TopLeft, Square::Occupied(Player::X));
    let next = rules::apply(&board, Position::BottomRight, Player::O);

    for pos in Position::ALL {
        if pos == Position::BottomRight {
            assert_eq!(next.get(pos), Square::Occupied(Player::O));
        } else {
            assert_eq!(next.get(pos), board.get(pos));
        }
    }
}

/// Rows, columns and diagonals as cell indices, row-major.
const INDEX_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn board_from_code(mut code: u32) -> ([Square; 9], Board) {
    let mut cells = [Square::Empty; 9];
    let mut board = Board::new();
    for (index, cell) in cells.iter_mut().enumerate() {
        *cell = match code % 3 {
            0 => Square::Empty,
            1 => Square::Occupied(Player::O),
            _ => Square::Occupied(Player::X),
        };
        code /= 3;
        board.set(Position::from_index(index).unwrap(), *cell);
    }
    (cells, board)
}

fn owns_line(cells: &[Square; 9], player: Player) -> bool {
    INDEX_LINES
        .iter()
        .any(|line| line.iter().all(|&i| cells[i] == Square::Occupied(player)))
}

#[test]
fn test_status_of_every_board() {
    for code in 0..3u32.pow(9) {
        let (cells, board) = board_from_code(code);
        let o_line = owns_line(&cells, Player::O);
        let x_line = owns_line(&cells, Player::X);
        let full = cells.iter().all(|cell| *cell != Square::Empty);
        let status = rules::terminal_status(&board);

        match (o_line, x_line) {
            (true, false) => assert_eq!(status, GameStatus::Won(Player::O), "{:?}", cells),
            (false, true) => assert_eq!(status, GameStatus::Won(Player::X), "{:?}", cells),
            // Both sides holding a line cannot arise in play; one winner is still reported.
            (true, true) => assert!(matches!(status, GameStatus::Won(_)), "{:?}", cells),
            (false, false) if full => assert_eq!(status, GameStatus::Draw, "{:?}", cells),
            (false, false) => assert_eq!(status, GameStatus::InProgress, "{:?}", cells),
        }
    }
}
