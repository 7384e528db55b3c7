//! Move selection for the computer opponent.

use crate::{Board, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Policy that chooses the computer's next cell.
pub trait Opponent: Send {
    /// Picks an empty cell, or `None` when the board is full.
    fn pick(&mut self, board: &Board) -> Option<Position>;

    /// Returns the opponent's display name.
    fn name(&self) -> &str;
}

/// Opponent choosing uniformly among the empty cells.
#[derive(Debug)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    /// Creates an opponent seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible opponent.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn pick(&mut self, board: &Board) -> Option<Position> {
        let empty = Position::empty_cells(board);
        let choice = empty.choose(&mut self.rng).copied();
        debug!(candidates = empty.len(), ?choice, "Random opponent picked");
        choice
    }

    fn name(&self) -> &str {
        "Random"
    }
}
