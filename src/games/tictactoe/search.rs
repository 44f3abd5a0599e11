//! Exhaustive minimax search for the computer player.
//!
//! Scores are taken from the side that asked for a move: a win scores
//! `10 - depth`, a loss `depth - 10` and a draw `0`, where `depth` counts
//! plies from the searched position. The depth term makes the engine take
//! the fastest win and drag out a lost game for as long as possible.
//!
//! The whole tree is walked without pruning so every root move gets an
//! exact score, and ties go to the lowest index.

use super::{Board, Outcome, Player, Position};
use derive_getters::Getters;
use tracing::{debug, instrument};

/// Score of a win reached on the very next ply, before the depth penalty.
pub const WIN_SCORE: i32 = 10;

/// Returns the optimal move for `player`.
///
/// # Panics
///
/// If the board is already decided. Callers check the outcome first.
pub fn best_move(board: &Board, player: Player) -> Position {
    Minimax::new().best_move(board, player)
}

/// Minimax searcher. Keeps the node count of its last search.
#[derive(Debug, Clone, Default, Getters)]
pub struct Minimax {
    /// Positions visited during the last search.
    nodes: u64,
}

impl Minimax {
    /// Creates a searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the optimal move for `player`, preferring the lowest index
    /// among equally scored moves.
    ///
    /// # Panics
    ///
    /// If the board is already decided.
    #[instrument(skip(self, board))]
    pub fn best_move(&mut self, board: &Board, player: Player) -> Position {
        let mut best: Option<(Position, i32)> = None;
        for (position, score) in self.score_moves(board, player) {
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((position, score));
            }
        }
        let Some((position, score)) = best else {
            unreachable!("an undecided board always has an empty square");
        };
        debug!(%position, score, nodes = self.nodes, "Search complete");
        position
    }

    /// Scores every legal move for `player`, in index order.
    ///
    /// The caller's board is left untouched: the search runs on a copy.
    ///
    /// # Panics
    ///
    /// If the board is already decided.
    #[instrument(skip(self, board))]
    pub fn score_moves(&mut self, board: &Board, player: Player) -> Vec<(Position, i32)> {
        assert_eq!(
            board.outcome(),
            Outcome::InProgress,
            "search needs an undecided position"
        );
        self.nodes = 0;

        let mut scratch = board.clone();
        let mut scores = Vec::with_capacity(9);
        for position in Position::ALL {
            if !scratch.is_vacant(position) {
                continue;
            }
            scratch.place(position, player);
            let score = self.minimax(&mut scratch, player.opponent(), player, 1);
            scratch.clear(position);
            scores.push((position, score));
        }
        scores
    }

    /// Value of `board` for `maximizer` with `to_move` on turn, `depth`
    /// plies below the root. Every mark placed here is cleared again
    /// before returning.
    fn minimax(
        &mut self,
        board: &mut Board,
        to_move: Player,
        maximizer: Player,
        depth: i32,
    ) -> i32 {
        self.nodes += 1;
        match board.outcome() {
            Outcome::Win(winner) if winner == maximizer => return WIN_SCORE - depth,
            Outcome::Win(_) => return depth - WIN_SCORE,
            Outcome::Draw => return 0,
            Outcome::InProgress => {}
        }

        let maximizing = to_move == maximizer;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for position in Position::ALL {
            if !board.is_vacant(position) {
                continue;
            }
            board.place(position, to_move);
            let score = self.minimax(board, to_move.opponent(), maximizer, depth + 1);
            board.clear(position);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}
