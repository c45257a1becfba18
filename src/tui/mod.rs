//! Terminal UI for human-vs-model games.
//!
//! The orchestrator runs in a spawned task; this loop renders
//! [`GameEvent`]s and feeds the human's clicks and key presses back over a
//! channel.

mod app;
mod input;
mod ui;

pub use app::App;

use crate::games::tictactoe::{Outcome, Player, Position};
use crate::match_config::{MatchConfig, PlayerKind};
use crate::orchestrator::{GameEvent, Orchestrator};
use crate::players::{self, HumanPlayer, MoveSource, SimpleAI};
use crate::telemetry::Telemetry;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// Display name of the human side.
pub const HUMAN_NAME: &str = "You";

/// Pause before the offline player answers, so its move is visible.
const SIMPLE_AI_DELAY: Duration = Duration::from_millis(400);

/// One running game: the orchestrator task and its channels.
struct GameSession {
    handle: JoinHandle<Outcome>,
    move_tx: mpsc::UnboundedSender<Position>,
    event_rx: mpsc::UnboundedReceiver<GameEvent>,
}

impl GameSession {
    /// Builds the players and spawns the orchestrator. Player one is the
    /// model; the human plays second.
    #[instrument(skip(config))]
    fn spawn(config: &MatchConfig) -> Result<Self> {
        let opponent: Box<dyn MoveSource> = match config.player_one().kind() {
            PlayerKind::Simple => Box::new(
                SimpleAI::new(config.player_one().name().clone()).with_delay(SIMPLE_AI_DELAY),
            ),
            PlayerKind::Llm => players::from_config(config.player_one())
                .context("Failed to create the automated player")?,
        };

        let (move_tx, move_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let human = Box::new(HumanPlayer::new(HUMAN_NAME, move_rx));

        let max_attempts = *config.max_attempts();
        let telemetry_config = config.telemetry().clone();
        let handle = tokio::spawn(async move {
            let telemetry = Telemetry::connect(&telemetry_config).await;
            let mut orchestrator = Orchestrator::new(opponent, human)
                .with_max_attempts(max_attempts)
                .with_events(event_tx)
                .with_telemetry(telemetry);
            orchestrator.run().await
        });

        Ok(Self {
            handle,
            move_tx,
            event_rx,
        })
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs the terminal UI until the user quits.
///
/// Logging must already be pointed away from the terminal.
#[instrument(skip(config), fields(opponent = %config.player_one().name()))]
pub async fn run_human_game(config: &MatchConfig) -> Result<()> {
    info!("Starting terminal UI");

    // Fail on bad credentials before touching the terminal.
    let session = GameSession::spawn(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, config, session).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &MatchConfig,
    mut session: GameSession,
) -> Result<()> {
    let mut app = App::new(Player::FIRST.opponent());

    loop {
        while let Ok(event) = session.event_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !event::poll(Duration::from_millis(50))? {
            tokio::task::yield_now().await;
            continue;
        }

        let selected = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    info!("User quit");
                    return Ok(());
                }
                KeyCode::Char('r') if app.outcome().is_some() => {
                    info!("Restarting game");
                    match GameSession::spawn(config) {
                        Ok(next) => {
                            session = next;
                            app.restart();
                        }
                        Err(e) => {
                            warn!(error = %e, "Could not restart");
                        }
                    }
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => Some(app.cursor()),
                KeyCode::Char(c) => input::digit_to_position(c),
                code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
                    app.set_cursor(input::move_cursor(app.cursor(), code));
                    None
                }
                _ => None,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                input::cell_at(app.cell_areas(), mouse.column, mouse.row)
            }
            _ => None,
        };

        if let Some(pos) = selected
            && let Some(pos) = app.select(pos)
            && session.move_tx.send(pos).is_err()
        {
            warn!("Game task is gone, move dropped");
        }
    }
}
