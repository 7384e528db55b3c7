//! Command-line interface for bitcoin_toe.

use clap::{Parser, Subcommand};

/// Bitcoin Toe - persona tic-tac-toe recorded on chain
#[derive(Parser, Debug)]
#[command(name = "bitcoin_toe")]
#[command(about = "Tic-tac-toe between Donald and Kamala, settled on chain", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to the configuration file (defaults apply if missing)
        #[arg(short, long, default_value = "bitcoin_toe.toml")]
        config: std::path::PathBuf,

        /// Skip the selection screen and play as this persona ("donald" or "kamala")
        #[arg(long)]
        persona: Option<String>,

        /// Log file for the terminal UI
        #[arg(long, default_value = "bitcoin_toe.log")]
        log_file: std::path::PathBuf,
    },

    /// Write the default configuration file
    InitConfig {
        /// Where to write it
        #[arg(short, long, default_value = "bitcoin_toe.toml")]
        path: std::path::PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
