//! Keyboard and mouse mapping onto board cells.

use crate::games::tictactoe::Position;
use crossterm::event::KeyCode;
use ratatui::layout::{Position as ScreenPoint, Rect};

/// Moves cursor based on arrow keys. Stops at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row() as i64, cursor.col() as i64);
    let (row, col) = match key {
        KeyCode::Up => (row - 1, col),
        KeyCode::Down => (row + 1, col),
        KeyCode::Left => (row, col - 1),
        KeyCode::Right => (row, col + 1),
        _ => (row, col),
    };
    Position::from_coords(row, col).unwrap_or(cursor)
}

/// Maps digit keys `1`-`9` to cells in reading order.
pub fn digit_to_position(c: char) -> Option<Position> {
    let digit = c.to_digit(10)?;
    if digit == 0 {
        return None;
    }
    Position::from_index(digit as usize - 1)
}

/// Finds the cell whose screen area contains `(column, row)`.
pub fn cell_at(cell_areas: &[Rect; 9], column: u16, row: u16) -> Option<Position> {
    cell_areas
        .iter()
        .position(|area| area.contains(ScreenPoint::new(column, row)))
        .and_then(Position::from_index)
}
