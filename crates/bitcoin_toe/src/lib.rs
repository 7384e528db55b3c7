//! Bitcoin Toe - persona tic-tac-toe recorded on chain.
//!
//! The human picks Donald Trump or Kamala Harris and plays against a random
//! computer opponent. Creating a game and winning it each submit a
//! transaction through the player's wallet.
//!
//! # Architecture
//!
//! - **Game logic**: [`bitcoin_toe_game`], pure state machine
//! - **Chain**: [`ChainNotifier`] capability and its [`WalletNotifier`]
//! - **Controller**: single-consumer actor owning the game state and timers
//! - **TUI**: terminal front-end standing in for the browser page
//!
//! # Example
//!
//! ```no_run
//! use bitcoin_toe::{AppConfig, GameController, WalletNotifier};
//! use bitcoin_toe_game::{Persona, RandomOpponent};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let notifier = Arc::new(WalletNotifier::new(config.chain().clone())?);
//! let (events, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let (controller, handle) =
//!     GameController::new(&config, notifier, Box::new(RandomOpponent::new()), events);
//! controller.spawn();
//! handle.select_character(Persona::DonaldTrump)?;
//! handle.click(4)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chain;
mod cli;
mod config;
mod controller;
pub mod tui;

// Crate-level exports - Chain boundary
pub use chain::{
    ChainError, ChainErrorKind, ChainNotifier, EntryFunctionPayload, SubmitRequest,
    SubmitResponse, TxHandle, WalletNotifier,
};

// Crate-level exports - CLI
pub use cli::{Cli, Command as CliCommand};

// Crate-level exports - Configuration
pub use config::{ACCOUNT_ENV, AppConfig, ChainConfig, ConfigError, TimingConfig, WALLET_URL_ENV};

// Crate-level exports - Controller
pub use controller::{
    Command, ControllerClosed, ControllerHandle, GameController, GameEvent, GameSnapshot, TxKind,
};
