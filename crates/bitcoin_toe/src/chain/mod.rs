//! Boundary to the ledger.
//!
//! The game only ever needs two transactions: one when a game is created and
//! one when it is won. Both are fire-and-forget from the game's point of
//! view; the controller logs failures and carries on.

mod error;
mod payload;
mod wallet;

pub use error::{ChainError, ChainErrorKind};
pub use payload::{EntryFunctionPayload, SubmitRequest, SubmitResponse};
pub use wallet::WalletNotifier;

use bitcoin_toe_game::Persona;
use serde::{Deserialize, Serialize};

/// Receipt of a submitted transaction. Not interpreted by game logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", hash)]
pub struct TxHandle {
    /// Transaction hash.
    pub hash: String,
}

impl TxHandle {
    /// Wraps a transaction hash.
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
}

/// Capability for recording games on chain.
#[async_trait::async_trait]
pub trait ChainNotifier: Send + Sync {
    /// Records a new game played as `persona`.
    ///
    /// Only the persona's code goes on chain; `game_id` is for logging.
    async fn create_game(&self, persona: Persona, game_id: u64) -> Result<TxHandle, ChainError>;

    /// Records the winner of `game_id`.
    async fn report_winner(&self, game_id: u64, player_won: bool) -> Result<TxHandle, ChainError>;
}
