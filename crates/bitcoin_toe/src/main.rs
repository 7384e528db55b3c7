//! Bitcoin Toe - unified CLI.

#![warn(missing_docs)]

use anyhow::{Context, Result, bail};
use bitcoin_toe::{AppConfig, Cli, CliCommand, tui};
use bitcoin_toe_game::Persona;
use clap::Parser;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        CliCommand::Play {
            config,
            persona,
            log_file,
        } => run_play(&config, persona.as_deref(), &log_file).await,
        CliCommand::InitConfig { path, force } => init_config(path, force),
    }
}

/// Loads the configuration and starts the terminal UI.
async fn run_play(config: &Path, persona: Option<&str>, log_file: &Path) -> Result<()> {
    let config = AppConfig::load(config)?;

    let persona = match persona {
        Some(name) => match Persona::from_name(name) {
            Some(p) => Some(p),
            None => bail!("Unknown persona '{name}', expected 'donald' or 'kamala'"),
        },
        None => None,
    };

    tui::run_tui(config, persona, log_file).await
}

/// Writes the default configuration to `path`.
fn init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }

    let contents = AppConfig::default().to_toml()?;
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
