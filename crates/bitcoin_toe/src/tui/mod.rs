//! Terminal front-end.

mod app;
mod input;
mod ui;

pub use app::{Action, App};

use crate::chain::WalletNotifier;
use crate::config::AppConfig;
use crate::controller::{ControllerHandle, GameController, GameEvent};
use anyhow::{Context, Result};
use bitcoin_toe_game::{Persona, RandomOpponent};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the terminal UI until the player quits.
///
/// Logs go to `log_file` so they do not interfere with the screen.
pub async fn run_tui(config: AppConfig, persona: Option<Persona>, log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,bitcoin_toe=debug")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();

    info!(
        wallet_url = %config.chain().wallet_url(),
        account_configured = config.chain().account().is_some(),
        "Starting Bitcoin Toe"
    );

    let notifier = Arc::new(WalletNotifier::new(config.chain().clone())?);
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (controller, handle) = GameController::new(
        &config,
        notifier,
        Box::new(RandomOpponent::new()),
        events_tx,
    );
    let controller_task = controller.spawn();

    if let Some(persona) = persona {
        info!(%persona, "Persona chosen on the command line");
        handle.select_character(persona)?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_loop(&mut terminal, &handle, events_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        error!(error = ?e, "Game loop error");
    }

    let _ = handle.shutdown();
    drop(handle);
    controller_task.await.context("Game controller panicked")?;
    info!("Bitcoin Toe exited");

    res
}

#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    handle: &ControllerHandle,
    mut events: mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        if !event::poll(POLL_INTERVAL)? {
            tokio::task::yield_now().await;
            continue;
        }

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app.handle_key(key.code) {
                Action::Quit => {
                    info!("Player quit");
                    return Ok(());
                }
                Action::Select(persona) => {
                    debug!(%persona, "Selecting character");
                    handle.select_character(persona)?;
                }
                Action::Click(index) => {
                    debug!(index, "Clicking cell");
                    handle.click(index)?;
                }
                Action::None => {}
            }
        }
    }
}
