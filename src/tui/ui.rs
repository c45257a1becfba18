//! UI rendering using ratatui.

use super::app::App;
use crate::games::tictactoe::{Player, Position, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;

/// Draws the main UI and records the cell areas for mouse input.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("LLM Tic-Tac-Toe - you play {}", app.human()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let cell_areas = draw_board(f, chunks[1], app);
    app.set_cell_areas(cell_areas);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[2]);

    let help_text = match app.usage_summary() {
        Some(summary) => format!("{} | R: Restart | Q: Quit", summary),
        None => "Click a cell, 1-9, or arrows + Enter | R: Restart | Q: Quit".to_string(),
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

fn draw_board(f: &mut Frame, area: Rect, app: &App) -> [Rect; 9] {
    let board_area = center_rect(area, CELL_WIDTH * 3 + 2, CELL_HEIGHT * 3 + 2);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board_area);

    let mut cell_areas = [Rect::default(); 9];
    for (r, row_area) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(row_area);

        for (c, cell_area) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
            let Some(pos) = Position::from_index(r * 3 + c) else {
                continue;
            };
            draw_cell(f, cell_area, app, pos);
            cell_areas[pos.to_index()] = cell_area;
        }
        draw_separator_vertical(f, cols[1]);
        draw_separator_vertical(f, cols[3]);
    }
    draw_separator(f, rows[1]);
    draw_separator(f, rows[3]);

    cell_areas
}

fn draw_cell(f: &mut Frame, area: Rect, app: &App, pos: Position) {
    let (symbol, base_style) = match app.board().get(pos) {
        Square::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Square::Occupied(Player::X) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if pos == app.cursor() && app.awaiting_human() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    // Vertically center the mark in the cell.
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(symbol, style)),
    ];
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_separator(f: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(sep, area);
}

fn draw_separator_vertical(f: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Outcome, TokenUsage};
    use crate::orchestrator::GameEvent;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_game_over_shows_token_counts() {
        let mut app = App::new(Player::X);
        assert!(!rendered(&mut app).contains("Tokens used"));

        app.handle_event(GameEvent::GameOver {
            outcome: Outcome::Winner(Player::O),
            usage: TokenUsage { x: 0, o: 318 },
        });
        assert!(rendered(&mut app).contains("Tokens used by O: 318 | X: 0"));
    }
}
