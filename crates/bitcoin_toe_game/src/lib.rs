//! Bitcoin Toe game logic.
//!
//! Tic-tac-toe against a computer opponent where the human plays one of two
//! personas. This crate is pure: no I/O and no async. State transitions
//! return [`Effect`]s describing the transactions and timers the
//! application must run.
//!
//! # Example
//!
//! ```
//! use bitcoin_toe_game::{Effect, GameState, Persona, Phase};
//!
//! let mut state = GameState::new(1005);
//! let effects = state.select_character(Persona::KamalaHarris);
//! assert_eq!(
//!     effects,
//!     vec![Effect::CreateGame { persona: Persona::KamalaHarris, game_id: 1006 }]
//! );
//! assert_eq!(state.phase(), Phase::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod effect;
mod error;
mod opponent;
mod persona;
mod position;
pub mod rules;
mod session;
mod state;
mod types;

pub use effect::{Effect, Ticket, Timer};
pub use error::MoveError;
pub use opponent::{Opponent, RandomOpponent};
pub use persona::{Persona, PriceOutlook};
pub use position::Position;
pub use session::{GameSession, Status};
pub use state::{GameState, Phase};
pub use types::{Board, BoardParseError, Cell, Mark};
