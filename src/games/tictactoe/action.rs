//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::{Player, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}

/// What a human asks for on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place the mark at a position.
    Place(Position),
    /// Persist the current round.
    Save,
    /// Take back the last move.
    Undo,
    /// Leave the game.
    Quit,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index does not name a square.
    #[display("Cell index {} is outside 0-8", _0)]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("Cell {} is already occupied", _0)]
    Occupied(Position),

    /// The round is already over.
    #[display("Round is already over")]
    RoundOver,
}

impl std::error::Error for MoveError {}
