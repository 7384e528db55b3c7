//! The game-state machine.
//!
//! ```text
//! SelectingCharacter -> InProgress -> Won   -> (reload) -> SelectingCharacter
//!                                  -> Drawn -> (reset)  -> InProgress
//! ```
//!
//! Every transition is a synchronous method that mutates the state and
//! returns the [`Effect`]s the caller must carry out. Timers come back in
//! through [`GameState::fire`] carrying the [`Ticket`] they were armed with.

use crate::effect::{Effect, Ticket, Timer};
use crate::error::MoveError;
use crate::opponent::Opponent;
use crate::session::{GameSession, Status};
use crate::{Mark, Persona, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Coarse phase, as shown to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No persona chosen; the board is not reachable.
    SelectingCharacter,
    /// A game is being played.
    InProgress,
    /// A game was won and is waiting to reload.
    Won(Mark),
    /// A board filled up and is waiting to be cleared.
    Drawn,
}

/// Owns the current session and the game id counter.
#[derive(Debug, Clone)]
pub struct GameState {
    last_game_id: u64,
    session: Option<GameSession>,
    transactions_in_flight: u32,
}

impl GameState {
    /// Creates a state waiting for character selection.
    ///
    /// The first game created gets `initial_game_id + 1`.
    #[instrument]
    pub fn new(initial_game_id: u64) -> Self {
        Self {
            last_game_id: initial_game_id,
            session: None,
            transactions_in_flight: 0,
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        match self.session.as_ref().map(GameSession::status) {
            None => Phase::SelectingCharacter,
            Some(Status::InProgress) => Phase::InProgress,
            Some(Status::Won(mark)) => Phase::Won(mark),
            Some(Status::Drawn) => Phase::Drawn,
        }
    }

    /// Returns the active session.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Id handed to the most recently created game.
    pub fn last_game_id(&self) -> u64 {
        self.last_game_id
    }

    /// True while any notifier call is outstanding.
    pub fn transaction_in_flight(&self) -> bool {
        self.transactions_in_flight > 0
    }

    /// Records that a notifier call started.
    pub fn begin_transaction(&mut self) {
        self.transactions_in_flight += 1;
    }

    /// Records that a notifier call finished, successfully or not.
    pub fn finish_transaction(&mut self) {
        self.transactions_in_flight = self.transactions_in_flight.saturating_sub(1);
    }

    /// Starts a new game as `persona`.
    ///
    /// Any current session is discarded; timers armed for it go stale.
    #[instrument(skip(self), fields(previous_game_id = self.last_game_id))]
    pub fn select_character(&mut self, persona: Persona) -> Vec<Effect> {
        self.last_game_id += 1;
        let game_id = self.last_game_id;
        self.session = Some(GameSession::new(persona, game_id));
        info!(game_id, %persona, opponent = %persona.opponent(), "Character selected");
        vec![Effect::CreateGame { persona, game_id }]
    }

    /// Places the human's mark at `index` (0-8).
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] and leaves the board untouched when no game is
    /// running, the index is out of range, the game is over, the cell is
    /// taken, or the computer has not answered the previous move.
    #[instrument(skip(self))]
    pub fn player_move(&mut self, index: usize) -> Result<Vec<Effect>, MoveError> {
        let session = self.session.as_mut().ok_or(MoveError::NoCharacterSelected)?;
        let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;

        if session.status() != Status::InProgress {
            return Err(MoveError::GameOver);
        }
        if !session.board().is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }
        if session.opponent_pending() {
            return Err(MoveError::OpponentPending);
        }

        let mut effects = Vec::new();
        if session.place(pos, Mark::Player).is_some() {
            effects.push(Effect::ReportWinner {
                game_id: session.game_id(),
                player_won: true,
            });
            Self::on_won(session, &mut effects);
        } else if session.status() == Status::Drawn {
            Self::on_drawn(session, &mut effects);
        } else {
            session.set_opponent_pending(true);
            effects.push(Effect::Schedule(Timer::OpponentMove(session.ticket())));
        }

        debug!(position = %pos, board = %session.board().display(), "Player moved");
        Ok(effects)
    }

    /// Plays the computer's reply.
    ///
    /// Does nothing when the ticket is stale, the game already has a winner,
    /// no reply is pending, or the board has no empty cell.
    #[instrument(skip(self, opponent), fields(opponent = opponent.name()))]
    pub fn opponent_move(&mut self, ticket: Ticket, opponent: &mut dyn Opponent) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            debug!("No session, dropping opponent move");
            return Vec::new();
        };
        if session.ticket() != ticket {
            debug!(current = ?session.ticket(), "Stale opponent move");
            return Vec::new();
        }
        if session.winner().is_some() {
            return Vec::new();
        }
        if !session.opponent_pending() {
            debug!("No opponent move pending");
            return Vec::new();
        }
        session.set_opponent_pending(false);

        let Some(pos) = opponent.pick(session.board()) else {
            return Vec::new();
        };
        if !session.board().is_empty(pos) {
            warn!(position = %pos, "Opponent picked an occupied cell, skipping");
            return Vec::new();
        }

        let mut effects = Vec::new();
        if session.place(pos, Mark::Opponent).is_some() {
            effects.push(Effect::ReportWinner {
                game_id: session.game_id(),
                player_won: false,
            });
            Self::on_won(session, &mut effects);
        } else if session.status() == Status::Drawn {
            Self::on_drawn(session, &mut effects);
        }

        debug!(position = %pos, board = %session.board().display(), "Opponent moved");
        effects
    }

    /// Returns a won game to character selection. The id counter is kept.
    #[instrument(skip(self))]
    pub fn reload(&mut self, ticket: Ticket) -> bool {
        let current = self
            .session
            .as_ref()
            .is_some_and(|s| s.ticket() == ticket && s.winner().is_some());
        if !current {
            debug!("Stale reload");
            return false;
        }
        info!(game_id = ticket.game_id, "Reloading after win");
        self.session = None;
        true
    }

    /// Clears a drawn board, keeping persona and game id.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self, ticket: Ticket) -> bool {
        match self.session.as_mut() {
            Some(session) if session.ticket() == ticket && session.status() == Status::Drawn => {
                session.clear_board();
                info!(game_id = session.game_id(), round = session.round(), "Board reset after draw");
                true
            }
            _ => {
                debug!("Stale board reset");
                false
            }
        }
    }

    /// Dispatches a fired timer.
    #[instrument(skip(self, opponent))]
    pub fn fire(&mut self, timer: Timer, opponent: &mut dyn Opponent) -> Vec<Effect> {
        match timer {
            Timer::OpponentMove(ticket) => self.opponent_move(ticket, opponent),
            Timer::Reload(ticket) => {
                self.reload(ticket);
                Vec::new()
            }
            Timer::ResetBoard(ticket) => {
                self.reset_board(ticket);
                Vec::new()
            }
        }
    }

    fn on_won(session: &GameSession, effects: &mut Vec<Effect>) {
        info!(
            game_id = session.game_id(),
            winner = ?session.winning_persona(),
            "Game won"
        );
        effects.push(Effect::Schedule(Timer::Reload(session.ticket())));
    }

    fn on_drawn(session: &GameSession, effects: &mut Vec<Effect>) {
        info!(game_id = session.game_id(), "Game drawn");
        effects.push(Effect::Schedule(Timer::ResetBoard(session.ticket())));
    }
}
