//! Side effects requested by state transitions.
//!
//! Transitions never perform I/O. They return [`Effect`]s and the caller
//! (the controller) submits transactions and arms timers.

use crate::Persona;
use serde::{Deserialize, Serialize};

/// Identifies the board a timer was armed for.
///
/// `round` advances every time a drawn board is cleared, so a timer armed
/// before a reset or for an earlier game no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    /// Game the timer belongs to.
    pub game_id: u64,
    /// Board round within that game.
    pub round: u32,
}

/// Delayed callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timer {
    /// Computer plays its reply.
    OpponentMove(Ticket),
    /// Won game returns to character selection.
    Reload(Ticket),
    /// Drawn board is cleared for another round.
    ResetBoard(Ticket),
}

/// Work the caller must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Submit the create-game transaction.
    CreateGame {
        /// Persona chosen by the human.
        persona: Persona,
        /// Id of the new game.
        game_id: u64,
    },
    /// Submit the winner transaction.
    ReportWinner {
        /// Id of the finished game.
        game_id: u64,
        /// Whether the human won.
        player_won: bool,
    },
    /// Arm a delayed callback.
    Schedule(Timer),
}
