//! Strictly Noughts - console launcher
//!
//! Two people at one keyboard, or one person against the minimax engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use strictly_noughts::{ConsoleIo, FileStore, GameConfig, Mode, Player, Session};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    initialize_tracing(&config)?;

    info!(
        single_player = cli.single_player,
        load_saved = cli.load_saved,
        save_path = %config.save_path().display(),
        "Starting Strictly Noughts"
    );

    let mode = if cli.single_player {
        Mode::SinglePlayer {
            computer: Player::O,
        }
    } else {
        Mode::TwoPlayer
    };

    let stdin = std::io::stdin();
    let console = ConsoleIo::new(stdin.lock(), std::io::stdout(), *config.clear_screen());
    let store = FileStore::new(config.save_path());
    let mut session = Session::new(console, store, mode);

    if cli.load_saved {
        session.load_snapshot()?;
    }

    let scoreboard = session.run()?;
    info!(score = %scoreboard, "Exiting");
    Ok(())
}

#[instrument(skip(cli), fields(config_path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let config = GameConfig::load_or_default(&cli.config)?;
    Ok(match &cli.save_file {
        Some(path) => config.with_save_path(path),
        None => config,
    })
}

/// Sends logs to the configured file so they stay off the board.
fn initialize_tracing(config: &GameConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    match config.log_file() {
        Some(path) if !path.as_os_str().is_empty() => {
            let log_file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false)
                .try_init();
        }
        _ => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    Ok(())
}
