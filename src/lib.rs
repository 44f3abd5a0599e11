//! Strictly Noughts library - console tic-tac-toe with a minimax opponent
//!
//! # Architecture
//!
//! - **Games**: board, turn state machine, minimax search and snapshots
//! - **Session**: round orchestration between players, engine and storage
//! - **Console**: terminal implementation of the session's interface
//! - **Config**: TOML settings for the binary
//!
//! # Example
//!
//! ```
//! use strictly_noughts::{GameState, Outcome, Phase, best_move};
//!
//! let mut state = GameState::new();
//! while let Phase::AwaitingMove(player) = state.phase() {
//!     let position = best_move(state.board(), player);
//!     state.apply_move(position.index()).unwrap();
//! }
//! assert_eq!(state.outcome(), Outcome::Draw);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod games;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Terminal interface
pub use console::{ConsoleIo, InvalidInput, parse_action};

// Crate-level exports - Session management
pub use session::{GameEvent, GameIo, Mode, RoundEnd, Session};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Action, Board, FileStore, GameState, LINES, MalformedSnapshot, Minimax, Move, MoveError,
    OutOfRange, Outcome, Phase, Player, Position, SaveRecord, Scoreboard, SnapshotError,
    SnapshotStore, Square, WIN_SCORE, best_move,
};
