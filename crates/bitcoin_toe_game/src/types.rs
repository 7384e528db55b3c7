//! Core domain types for the board.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The symbol placed in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The human player (moves first).
    Player,
    /// The computer opponent.
    Opponent,
}

impl Mark {
    /// Board symbol for this mark.
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::Player => "X",
            Mark::Opponent => "O",
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    Empty,
    /// Cell holds a mark.
    Marked(Mark),
}

/// 3x3 board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

/// Error parsing a board from symbols.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Unknown board symbol {:?} at index {}", symbol, index)]
pub struct BoardParseError {
    /// The offending symbol.
    pub symbol: String,
    /// Index of the offending cell.
    pub index: usize,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from `"X"`, `"O"` and `""` symbols.
    #[instrument]
    pub fn from_symbols(symbols: [&str; 9]) -> Result<Self, BoardParseError> {
        let mut board = Self::new();
        for (index, symbol) in symbols.iter().enumerate() {
            board.cells[index] = match *symbol {
                "" => Cell::Empty,
                "X" => Cell::Marked(Mark::Player),
                "O" => Cell::Marked(Mark::Opponent),
                other => {
                    return Err(BoardParseError {
                        symbol: other.to_string(),
                        index,
                    });
                }
            };
        }
        Ok(board)
    }

    /// Gets the cell at a position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at a position.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of marked cells.
    pub fn marks(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Marked(mark) => mark.symbol().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_symbols() {
        let board = Board::from_symbols(["X", "", "O", "", "", "", "", "", ""]).unwrap();
        assert_eq!(board.get(Position::TopLeft), Cell::Marked(Mark::Player));
        assert_eq!(board.get(Position::TopRight), Cell::Marked(Mark::Opponent));
        assert_eq!(board.marks(), 2);
    }

    #[test]
    fn test_from_symbols_rejects_unknown() {
        let err = Board::from_symbols(["X", "Z", "", "", "", "", "", "", ""]).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.symbol, "Z");
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board = Board::from_symbols(["X", "", "", "", "O", "", "", "", ""]).unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
