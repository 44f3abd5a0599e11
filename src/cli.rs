//! Command-line interface for strictly_noughts.

use clap::Parser;
use std::path::PathBuf;

/// Strictly Noughts - console tic-tac-toe with a perfect computer opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_noughts")]
#[command(about = "Play tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Let the computer play O
    #[arg(long)]
    pub single_player: bool,

    /// Resume the saved round before the first round starts
    #[arg(long)]
    pub load_saved: bool,

    /// Path to the TOML config file
    #[arg(long, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Save file location (overrides the config file)
    #[arg(long)]
    pub save_file: Option<PathBuf>,
}
