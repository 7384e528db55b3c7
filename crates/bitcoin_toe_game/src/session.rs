//! One game against the computer.

use crate::effect::Ticket;
use crate::rules::{check_winner, is_full};
use crate::{Board, Cell, Mark, Persona, Position};
use serde::{Deserialize, Serialize};

/// Where a session stands. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Moves are accepted.
    InProgress,
    /// A line was completed by this mark.
    Won(Mark),
    /// Board full with no line.
    Drawn,
}

/// Board, persona and identity of the game being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    winner: Option<Mark>,
    persona: Persona,
    game_id: u64,
    round: u32,
    opponent_pending: bool,
}

impl GameSession {
    pub(crate) fn new(persona: Persona, game_id: u64) -> Self {
        Self {
            board: Board::new(),
            winner: None,
            persona,
            game_id,
            round: 0,
            opponent_pending: false,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark that completed a line, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Persona played by the human.
    pub fn persona(&self) -> Persona {
        self.persona
    }

    /// Persona played by the computer.
    pub fn opponent_persona(&self) -> Persona {
        self.persona.opponent()
    }

    /// Id submitted with the create-game transaction.
    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    /// Number of times a drawn board has been cleared in this game.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// True between a player move and the computer's reply.
    pub fn opponent_pending(&self) -> bool {
        self.opponent_pending
    }

    /// Ticket for timers armed against the current board.
    pub fn ticket(&self) -> Ticket {
        Ticket {
            game_id: self.game_id,
            round: self.round,
        }
    }

    /// Current status, derived from winner and board.
    pub fn status(&self) -> Status {
        match self.winner {
            Some(mark) => Status::Won(mark),
            None if is_full(&self.board) => Status::Drawn,
            None => Status::InProgress,
        }
    }

    /// Persona behind the winning mark.
    pub fn winning_persona(&self) -> Option<Persona> {
        self.winner.map(|mark| match mark {
            Mark::Player => self.persona,
            Mark::Opponent => self.persona.opponent(),
        })
    }

    /// Marks an empty cell and records a completed line.
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) -> Option<Mark> {
        debug_assert!(self.board.is_empty(pos), "marked cells are never overwritten");
        self.board.set(pos, Cell::Marked(mark));
        self.winner = check_winner(&self.board);
        self.winner
    }

    pub(crate) fn set_opponent_pending(&mut self, pending: bool) {
        self.opponent_pending = pending;
    }

    /// Clears the board for another round of the same game.
    pub(crate) fn clear_board(&mut self) {
        self.board = Board::new();
        self.winner = None;
        self.opponent_pending = false;
        self.round += 1;
    }
}
