//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game, identified by the mark they place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Player X.
    #[display("X")]
    X,
    /// Player O (moves first).
    #[display("O")]
    O,
}

impl Player {
    /// The mark that opens every game.
    pub const FIRST: Player = Player::O;

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the single-character symbol used on the grid.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Grid character for this square (`.` when empty).
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => EMPTY_SYMBOL,
            Square::Occupied(player) => player.symbol(),
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            EMPTY_SYMBOL => Some(Square::Empty),
            'X' => Some(Square::Occupied(Player::X)),
            'O' => Some(Square::Occupied(Player::O)),
            _ => None,
        }
    }
}

const EMPTY_SYMBOL: char = '.';

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn marks_placed(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Serializes the board as a row-major grid of single characters.
    ///
    /// The format is the nested-list notation sent to automated players:
    /// `[['.', 'O', '.'], ['.', 'X', '.'], ['.', '.', '.']]`.
    /// [`Board::from_grid`] parses it back.
    pub fn to_grid(&self) -> String {
        let rows: Vec<String> = self
            .squares
            .chunks(3)
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|s| format!("'{}'", s.symbol())).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        format!("[{}]", rows.join(", "))
    }

    /// Parses a grid produced by [`Board::to_grid`].
    ///
    /// Brackets, quotes, commas and whitespace are treated as separators, so
    /// any layout containing exactly nine cell symbols in row-major order is
    /// accepted.
    #[instrument]
    pub fn from_grid(grid: &str) -> Result<Self, GridError> {
        let mut squares = [Square::Empty; 9];
        let mut count = 0;

        for c in grid.chars() {
            if matches!(c, '[' | ']' | '\'' | '"' | ',') || c.is_whitespace() {
                continue;
            }
            let square = Square::from_symbol(c).ok_or(GridError::UnknownSymbol(c))?;
            if count == squares.len() {
                return Err(GridError::WrongCellCount(count + 1));
            }
            squares[count] = square;
            count += 1;
        }

        if count != squares.len() {
            return Err(GridError::WrongCellCount(count));
        }
        Ok(Self { squares })
    }

    /// Formats the board as boxed console rows.
    pub fn display(&self) -> String {
        self.squares
            .chunks(3)
            .map(|row| {
                let cells: Vec<String> = row
                    .iter()
                    .map(|s| match s {
                        Square::Empty => "   ".to_string(),
                        Square::Occupied(p) => format!(" {} ", p),
                    })
                    .collect();
                format!("|{}|", cells.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Failure to parse a board grid string.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// A character that is not a cell symbol or separator.
    #[display("Unknown cell symbol {:?}", _0)]
    UnknownSymbol(#[error(not(source))] char),
    /// The grid did not contain exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongCellCount(#[error(not(source))] usize),
}

/// Current status of the board as judged by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// A player completed a line.
    Won(Player),
    /// Board full with no line.
    Draw,
}

impl GameStatus {
    /// Returns true unless the game is still in progress.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}
