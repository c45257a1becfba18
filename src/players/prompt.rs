//! Prompt text for automated players and parsing of their replies.

use crate::games::tictactoe::{Board, Move, Player};
use regex::Regex;
use std::sync::LazyLock;

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "\
You are an autonomous Tic-Tac-Toe agent.
GENERAL RULES:
1. You play exactly one move per turn.
2. A move must target a cell that currently contains '.' (empty).
3. Choose the strongest legal move for {{SYMBOL}} only.
4. Never choose a filled cell.
5. Never describe reasoning, analysis, or commentary.

OBJECTIVE:
Maximize your chance of winning and minimize opponent advantage.

WIN-MAXIMIZATION STRATEGY (APPLY IN ORDER):
1. Immediate Win: play any move that wins instantly.
2. Block Opponent: if opponent can win next turn, block that move.
3. Center: take (1,1) if empty.
4. Corners: take any available corner.
5. Best Available: choose the most advantageous remaining empty cell.

RULES:
- You must pick exactly one empty cell.
- Never select a filled square.
- No explanations.

OUTPUT FORMAT (STRICT):
Return only:

    row,col

No other text, punctuation, or formatting.
";

/// Per-turn message; `{{SYMBOL}}` and `{{BOARD}}` are substituted.
pub const PLAYER_TEMPLATE: &str = "\
make your move.

YOUR SYMBOL: {{SYMBOL}}
BOARD STATE:
{{BOARD}}

Rows and columns are numbered 0-2, row 0 is the top.

OUTPUT FORMAT (STRICT):
Return only:

    row,col

No other text, punctuation, or formatting.
";

/// Fills a template's `{{SYMBOL}}` and `{{BOARD}}` placeholders.
pub fn render(template: &str, mark: Player, board: &Board) -> String {
    template
        .replace("{{SYMBOL}}", &mark.to_string())
        .replace("{{BOARD}}", &board.to_grid())
}

/// Builds the user message for one attempt, including the reason the
/// previous attempt was refused.
pub fn turn_message(mark: Player, board: &Board, rejection: Option<&str>) -> String {
    let message = render(PLAYER_TEMPLATE, mark, board);
    match rejection {
        Some(reason) => format!(
            "{}\nYOUR PREVIOUS ANSWER WAS REJECTED: {}\nPick a different empty cell.\n",
            message, reason
        ),
        None => message,
    }
}

/// Two integers, optionally negative, separated by a comma or a space.
static COORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+)\s*[, ]\s*(-?\d+)").expect("coordinate pattern is valid")
});

/// Finds the first `row,col` pair in a reply.
///
/// Surrounding whitespace is allowed: `1,2`, `1 2`, `(1, 2)` and
/// `Move: 0 ,2` all parse. Range checking is left to the rules.
pub fn parse_coord(reply: &str) -> Option<Move> {
    let captures = COORD_RE.captures(reply)?;
    let row = captures[1].parse().ok()?;
    let col = captures[2].parse().ok()?;
    Some(Move::new(row, col))
}
