//! Turn state machine for a single round.
//!
//! A [`GameState`] lives for one round. Its phase is never stored: it is
//! derived from the board on every query, so a finished board can never
//! disagree with the recorded status.

use super::action::{Move, MoveError};
use super::snapshot::SaveRecord;
use super::types::{Board, Outcome, Player, Scoreboard};
use super::Position;
use derive_getters::Getters;
use tracing::{debug, info, instrument};

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the player to place a mark.
    AwaitingMove(Player),
    /// The round ended; no further moves are accepted.
    RoundOver(Outcome),
}

/// Board, turn and tally for the current round.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player to move while the round is undecided.
    current_player: Player,
    /// The one move that can still be taken back.
    last_move: Option<Move>,
    /// Engine reply taken back together with `last_move`.
    reply: Option<Move>,
    /// Counters carried over from earlier rounds.
    scoreboard: Scoreboard,
}

impl GameState {
    /// Creates the first round of a run: empty board, X to move, no score.
    #[instrument]
    pub fn new() -> Self {
        Self::with_scoreboard(Scoreboard::default())
    }

    /// Creates a fresh round that keeps the given counters.
    #[instrument]
    pub fn with_scoreboard(scoreboard: Scoreboard) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            last_move: None,
            reply: None,
            scoreboard,
        }
    }

    /// Starts the next round, carrying the counters forward.
    #[instrument(skip(self))]
    pub fn next_round(&self) -> Self {
        info!(score = %self.scoreboard, "Starting next round");
        Self::with_scoreboard(self.scoreboard)
    }

    /// Resumes a persisted round. Nothing can be undone in the result.
    #[instrument(skip(record))]
    pub fn resume(record: &SaveRecord, scoreboard: Scoreboard) -> Self {
        Self {
            board: record.board().clone(),
            current_player: *record.current_player(),
            last_move: None,
            reply: None,
            scoreboard,
        }
    }

    /// Derives the phase from the board.
    pub fn phase(&self) -> Phase {
        match self.board.outcome() {
            Outcome::InProgress => Phase::AwaitingMove(self.current_player),
            outcome => Phase::RoundOver(outcome),
        }
    }

    /// Derives the outcome from the board.
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Places the current player's mark at a raw cell index (0-8).
    ///
    /// On success the move becomes the one that [`undo_last_move`] can
    /// take back. A move that ends the round is counted on the scoreboard
    /// exactly once; otherwise the turn passes to the opponent.
    ///
    /// # Errors
    ///
    /// Nothing is mutated on error.
    /// - [`MoveError::RoundOver`] if the board is already decided.
    /// - [`MoveError::OutOfRange`] if `index` is not 0-8.
    /// - [`MoveError::Occupied`] if the square already holds a mark.
    ///
    /// [`undo_last_move`]: GameState::undo_last_move
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, index: usize) -> Result<Phase, MoveError> {
        let (played, phase) = self.play(index)?;
        self.last_move = Some(played);
        self.reply = None;
        Ok(phase)
    }

    /// Places an engine reply to the last move.
    ///
    /// The reply is bundled with the move it answers, so the next undo
    /// takes back both and returns the turn to the human. Errors as
    /// [`apply_move`](GameState::apply_move).
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_reply(&mut self, index: usize) -> Result<Phase, MoveError> {
        let (played, phase) = self.play(index)?;
        self.reply = Some(played);
        Ok(phase)
    }

    fn play(&mut self, index: usize) -> Result<(Move, Phase), MoveError> {
        let player = match self.phase() {
            Phase::AwaitingMove(player) => player,
            Phase::RoundOver(_) => return Err(MoveError::RoundOver),
        };
        let position = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        if !self.board.is_vacant(position) {
            return Err(MoveError::Occupied(position));
        }

        self.board.place(position, player);
        debug!(%position, "Mark placed");
        let played = Move::new(player, position);

        match self.board.outcome() {
            Outcome::InProgress => {
                self.advance_turn();
                Ok((played, Phase::AwaitingMove(self.current_player)))
            }
            outcome => {
                self.scoreboard.record(outcome);
                info!(%outcome, score = %self.scoreboard, "Round over");
                Ok((played, Phase::RoundOver(outcome)))
            }
        }
    }

    /// Takes back the last move and gives the turn back to whoever made it.
    ///
    /// An engine reply placed with [`apply_reply`] is cleared along with
    /// the move it answered. Only one move is remembered: a second call
    /// without an intervening move returns `None` and changes nothing. A
    /// decided round cannot be undone, since its result is already on the
    /// scoreboard.
    ///
    /// [`apply_reply`]: GameState::apply_reply
    #[instrument(skip(self))]
    pub fn undo_last_move(&mut self) -> Option<Move> {
        if self.outcome().is_decided() {
            debug!("Round over, undo ignored");
            return None;
        }
        let undone = self.last_move.take()?;
        if let Some(reply) = self.reply.take() {
            self.board.clear(reply.position);
            debug!(%reply, "Reply undone");
        }
        self.board.clear(undone.position);
        self.current_player = undone.player;
        debug!(%undone, "Move undone");
        Some(undone)
    }

    /// Hands the turn to the opponent.
    #[instrument(skip(self), fields(from = %self.current_player))]
    pub fn advance_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
