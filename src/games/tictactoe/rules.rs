//! Terminal-state rules for tic-tac-toe.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use super::{Board, Outcome};

/// Derives the outcome of a board: a completed line wins, otherwise a
/// full board draws.
pub fn outcome(board: &Board) -> Outcome {
    match check_winner(board) {
        Some(player) => Outcome::Win(player),
        None if is_full(board) => Outcome::Draw,
        None => Outcome::InProgress,
    }
}
