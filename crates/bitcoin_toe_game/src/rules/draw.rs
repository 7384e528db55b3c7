//! Draw detection logic.

use crate::{Board, Cell};
use tracing::instrument;

/// Checks if every cell is marked.
///
/// A full board with no winner is a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
