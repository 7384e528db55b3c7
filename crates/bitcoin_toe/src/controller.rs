//! Single-consumer game controller.
//!
//! The controller owns the [`GameState`] and processes one message at a time
//! from its mailbox: commands from the front-end, timers that fired, and
//! notifier calls that finished. Timers and notifier calls run as separate
//! tokio tasks and post back into the mailbox, so no two handlers ever touch
//! the state at once.

use crate::chain::{ChainError, ChainNotifier, TxHandle};
use crate::config::{AppConfig, TimingConfig};
use bitcoin_toe_game::{Board, Effect, GameState, Opponent, Persona, Phase, Timer};
use derive_more::{Display, Error};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Input from the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a game as this persona.
    SelectCharacter(Persona),
    /// Player clicked cell 0-8.
    ClickCell(usize),
}

/// Which notifier operation a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TxKind {
    /// `create_game`
    #[display("create_game")]
    CreateGame,
    /// `set_winner`
    #[display("set_winner")]
    ReportWinner,
}

#[derive(Debug)]
enum Message {
    Command(Command),
    TimerFired(Timer),
    TransactionFinished {
        kind: TxKind,
        game_id: u64,
        result: Result<TxHandle, ChainError>,
    },
    Shutdown,
}

/// Everything the front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Board contents (empty while selecting).
    pub board: Board,
    /// Persona played by the human.
    pub persona: Option<Persona>,
    /// Id of the game being played.
    pub game_id: Option<u64>,
    /// Persona that won, once the game is over.
    pub winner: Option<Persona>,
    /// Computer reply pending.
    pub opponent_pending: bool,
    /// A transaction is being signed or submitted.
    pub transaction_in_flight: bool,
}

impl GameSnapshot {
    fn of(state: &GameState) -> Self {
        let session = state.session();
        Self {
            phase: state.phase(),
            board: session.map(|s| s.board().clone()).unwrap_or_default(),
            persona: session.map(|s| s.persona()),
            game_id: session.map(|s| s.game_id()),
            winner: session.and_then(|s| s.winning_persona()),
            opponent_pending: session.is_some_and(|s| s.opponent_pending()),
            transaction_in_flight: state.transaction_in_flight(),
        }
    }
}

/// Messages sent from the controller to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// State after a handled message.
    StateChanged(GameSnapshot),
    /// One-off announcement for the player.
    Notice(String),
}

/// The controller has stopped and no longer accepts commands.
#[derive(Debug, Clone, Display, Error)]
#[display("Game controller has stopped")]
pub struct ControllerClosed;

/// Cloneable handle for sending commands to a running controller.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    sender: mpsc::UnboundedSender<Message>,
}

impl ControllerHandle {
    /// Sends a command.
    pub fn send(&self, command: Command) -> Result<(), ControllerClosed> {
        self.sender
            .send(Message::Command(command))
            .map_err(|_| ControllerClosed)
    }

    /// Starts a game as `persona`.
    pub fn select_character(&self, persona: Persona) -> Result<(), ControllerClosed> {
        self.send(Command::SelectCharacter(persona))
    }

    /// Clicks cell `index`.
    pub fn click(&self, index: usize) -> Result<(), ControllerClosed> {
        self.send(Command::ClickCell(index))
    }

    /// Asks the controller to stop after the messages already queued.
    pub fn shutdown(&self) -> Result<(), ControllerClosed> {
        self.sender.send(Message::Shutdown).map_err(|_| ControllerClosed)
    }
}

/// Actor driving one player's games.
pub struct GameController {
    state: GameState,
    notifier: Arc<dyn ChainNotifier>,
    opponent: Box<dyn Opponent>,
    timing: TimingConfig,
    inbox: mpsc::UnboundedReceiver<Message>,
    mailbox: mpsc::WeakUnboundedSender<Message>,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl GameController {
    /// Creates a controller and the handle that feeds it.
    ///
    /// The controller stops once every handle is dropped or
    /// [`ControllerHandle::shutdown`] is called.
    #[instrument(skip_all, fields(initial_game_id = *config.initial_game_id(), opponent = opponent.name()))]
    pub fn new(
        config: &AppConfig,
        notifier: Arc<dyn ChainNotifier>,
        opponent: Box<dyn Opponent>,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> (Self, ControllerHandle) {
        let (sender, inbox) = mpsc::unbounded_channel();
        let controller = Self {
            state: GameState::new(*config.initial_game_id()),
            notifier,
            opponent,
            timing: *config.timing(),
            inbox,
            mailbox: sender.downgrade(),
            events,
        };
        (controller, ControllerHandle { sender })
    }

    /// Runs the controller on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Processes messages until shutdown.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Game controller started");
        self.publish();

        while let Some(message) = self.inbox.recv().await {
            if matches!(message, Message::Shutdown) {
                break;
            }
            self.handle(message);
            self.publish();
        }

        info!("Game controller stopped");
    }

    fn handle(&mut self, message: Message) {
        let before = self.state.phase();
        match message {
            Message::Command(Command::SelectCharacter(persona)) => {
                let effects = self.state.select_character(persona);
                self.execute(effects);
            }
            Message::Command(Command::ClickCell(index)) => match self.state.player_move(index) {
                Ok(effects) => self.execute(effects),
                Err(e) => debug!(index, reason = %e, "Ignoring click"),
            },
            Message::TimerFired(timer) => {
                let effects = self.state.fire(timer, self.opponent.as_mut());
                self.execute(effects);
            }
            Message::TransactionFinished {
                kind,
                game_id,
                result,
            } => self.finish_transaction(kind, game_id, result),
            Message::Shutdown => {}
        }
        self.announce(before);
    }

    /// Announces wins and draw resets.
    fn announce(&self, before: Phase) {
        let after = self.state.phase();
        match (before, after) {
            (Phase::Won(_), Phase::Won(_)) => {}
            (_, Phase::Won(_)) => {
                if let Some(winner) = self.state.session().and_then(|s| s.winning_persona()) {
                    self.notify(format!(
                        "{} wins! BTC price will {}.",
                        winner,
                        winner.outlook()
                    ));
                }
            }
            (Phase::Drawn, Phase::InProgress) => {
                self.notify("It's a draw! Starting a new game.".to_string());
            }
            _ => {}
        }
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CreateGame { persona, game_id } => {
                    let notifier = Arc::clone(&self.notifier);
                    self.submit(TxKind::CreateGame, game_id, async move {
                        notifier.create_game(persona, game_id).await
                    });
                }
                Effect::ReportWinner {
                    game_id,
                    player_won,
                } => {
                    let notifier = Arc::clone(&self.notifier);
                    self.submit(TxKind::ReportWinner, game_id, async move {
                        notifier.report_winner(game_id, player_won).await
                    });
                }
                Effect::Schedule(timer) => self.schedule(timer),
            }
        }
    }

    /// Runs a notifier call on its own task. Attempted once, never retried.
    fn submit<F>(&mut self, kind: TxKind, game_id: u64, call: F)
    where
        F: Future<Output = Result<TxHandle, ChainError>> + Send + 'static,
    {
        debug!(%kind, game_id, "Submitting transaction");
        self.state.begin_transaction();
        let mailbox = self.mailbox.clone();
        tokio::spawn(async move {
            let result = call.await;
            if let Some(sender) = mailbox.upgrade() {
                let _ = sender.send(Message::TransactionFinished {
                    kind,
                    game_id,
                    result,
                });
            }
        });
    }

    fn finish_transaction(
        &mut self,
        kind: TxKind,
        game_id: u64,
        result: Result<TxHandle, ChainError>,
    ) {
        self.state.finish_transaction();
        match result {
            Ok(handle) => {
                info!(%kind, game_id, tx = %handle, "Transaction succeeded");
                let text = match kind {
                    TxKind::CreateGame => "Game created successfully!",
                    TxKind::ReportWinner => "Winner set successfully!",
                };
                self.notify(text.to_string());
            }
            Err(e) => warn!(%kind, game_id, error = %e, "Transaction failed"),
        }
    }

    fn schedule(&self, timer: Timer) {
        let delay = match timer {
            Timer::OpponentMove(_) => self.timing.opponent_delay(),
            Timer::Reload(_) | Timer::ResetBoard(_) => self.timing.end_of_game_delay(),
        };
        debug!(?timer, ?delay, "Scheduling timer");
        let mailbox = self.mailbox.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(sender) = mailbox.upgrade() {
                let _ = sender.send(Message::TimerFired(timer));
            }
        });
    }

    fn publish(&self) {
        let snapshot = GameSnapshot::of(&self.state);
        if self.events.send(GameEvent::StateChanged(snapshot)).is_err() {
            debug!("Front-end gone, dropping snapshot");
        }
    }

    fn notify(&self, text: String) {
        info!(notice = %text, "Notice");
        if self.events.send(GameEvent::Notice(text)).is_err() {
            debug!("Front-end gone, dropping notice");
        }
    }
}
