//! Rejected move reasons.

use crate::Position;

/// Why a player move was not applied.
///
/// None of these are fatal: the board is left untouched and the caller
/// simply ignores the input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// No persona has been chosen yet.
    #[display("No character selected")]
    NoCharacterSelected,

    /// Index is not 0-8.
    #[display("Cell index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// The game has a winner or the board is full.
    #[display("Game is already over")]
    GameOver,

    /// The computer has not replied to the previous move yet.
    #[display("Waiting for the opponent to move")]
    OpponentPending,
}

impl std::error::Error for MoveError {}
