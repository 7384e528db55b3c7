//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). The state machine calls
//! these after every placed mark.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};
