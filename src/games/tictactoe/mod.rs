//! Tic-tac-toe: board, turn state machine, minimax search and snapshots.

mod action;
mod game;
mod position;
mod rules;
mod search;
mod snapshot;
mod types;

pub use action::{Action, Move, MoveError};
pub use game::{GameState, Phase};
pub use position::Position;
pub use rules::LINES;
pub use search::{Minimax, WIN_SCORE, best_move};
pub use snapshot::{FileStore, MalformedSnapshot, SaveRecord, SnapshotError, SnapshotStore};
pub use types::{Board, OutOfRange, Outcome, Player, Scoreboard, Square};
