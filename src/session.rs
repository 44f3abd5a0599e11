//! Round orchestration between players, the engine and the snapshot store.

use crate::games::tictactoe::{
    Action, Board, GameState, Move, MoveError, Outcome, Phase, Player, Position, SaveRecord,
    Scoreboard, SnapshotError, SnapshotStore, best_move,
};
use anyhow::{Result, bail};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Who controls the marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Both marks are played by people at the keyboard.
    #[default]
    TwoPlayer,
    /// One mark is played by the minimax engine.
    SinglePlayer {
        /// The engine's mark.
        computer: Player,
    },
}

impl Mode {
    /// Whether the engine plays `player`.
    pub fn is_computer(&self, player: Player) -> bool {
        matches!(self, Mode::SinglePlayer { computer } if *computer == player)
    }
}

/// Messages sent from the session to the interface.
#[derive(Debug)]
pub enum GameEvent {
    /// A player is about to move.
    TurnStarted {
        /// Board before the move.
        board: Board,
        /// Player on turn.
        to_move: Player,
        /// Whether the engine will move.
        computer: bool,
    },
    /// A mark was placed.
    MoveMade {
        /// The move.
        played: Move,
        /// Whether the engine chose it.
        computer: bool,
    },
    /// The core refused a move; the same player moves again.
    MoveRejected(MoveError),
    /// The last move was taken back.
    Undone(Move),
    /// The round was written to the store.
    Saved,
    /// Writing the round failed; play continues.
    SaveFailed(SnapshotError),
    /// A saved round replaced the current one.
    Loaded,
    /// There was nothing to load.
    NoSavedGame,
    /// The saved round was unusable; the current round is unchanged.
    LoadFailed(SnapshotError),
    /// The round ended.
    RoundOver {
        /// Final board.
        board: Board,
        /// How it ended.
        outcome: Outcome,
        /// Counters including this round.
        scoreboard: Scoreboard,
        /// Wall time spent on the round.
        elapsed: Duration,
    },
}

/// Interface the session talks to: renders events and collects choices.
pub trait GameIo {
    /// Presents an event.
    fn show(&mut self, event: &GameEvent) -> Result<()>;

    /// Asks the human playing `player` what to do.
    fn next_action(&mut self, board: &Board, player: Player) -> Result<Action>;

    /// Asks whether to start another round.
    fn play_again(&mut self) -> Result<bool>;
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// Played to a result.
    Finished(Outcome),
    /// A player quit mid-round.
    Quit,
}

/// Orchestrates rounds for one run of the program.
pub struct Session<I, S> {
    io: I,
    store: S,
    mode: Mode,
    state: GameState,
}

impl<I: GameIo, S: SnapshotStore> Session<I, S> {
    /// Creates a session with a fresh first round.
    #[instrument(skip(io, store))]
    pub fn new(io: I, store: S, mode: Mode) -> Self {
        Self {
            io,
            store,
            mode,
            state: GameState::new(),
        }
    }

    /// The round being played.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The interface.
    pub fn io(&self) -> &I {
        &self.io
    }

    /// The snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Plays rounds until someone quits or declines another round.
    ///
    /// Returns the final counters.
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub fn run(&mut self) -> Result<Scoreboard> {
        info!("Starting session");
        loop {
            match self.play_round()? {
                RoundEnd::Quit => {
                    info!("Player quit");
                    break;
                }
                RoundEnd::Finished(_) => {
                    if !self.io.play_again()? {
                        break;
                    }
                    self.state = self.state.next_round();
                }
            }
        }
        let scoreboard = *self.state.scoreboard();
        info!(score = %scoreboard, "Session finished");
        Ok(scoreboard)
    }

    /// Plays the current round until it is decided or a player quits.
    #[instrument(skip(self))]
    pub fn play_round(&mut self) -> Result<RoundEnd> {
        let started = Instant::now();
        loop {
            let player = match self.state.phase() {
                Phase::AwaitingMove(player) => player,
                Phase::RoundOver(outcome) => {
                    self.io.show(&GameEvent::RoundOver {
                        board: self.state.board().clone(),
                        outcome,
                        scoreboard: *self.state.scoreboard(),
                        elapsed: started.elapsed(),
                    })?;
                    return Ok(RoundEnd::Finished(outcome));
                }
            };

            let computer = self.mode.is_computer(player);
            self.io.show(&GameEvent::TurnStarted {
                board: self.state.board().clone(),
                to_move: player,
                computer,
            })?;

            if computer {
                let position = best_move(self.state.board(), player);
                if let Err(e) = self.state.apply_reply(position.index()) {
                    bail!("engine chose an illegal move {position}: {e}");
                }
                self.io.show(&GameEvent::MoveMade {
                    played: Move::new(player, position),
                    computer: true,
                })?;
                continue;
            }

            match self.io.next_action(self.state.board(), player)? {
                Action::Place(position) => self.place(player, position)?,
                Action::Save => self.save_snapshot()?,
                Action::Undo => match self.state.undo_last_move() {
                    Some(undone) => self.io.show(&GameEvent::Undone(undone))?,
                    None => debug!("Nothing to undo"),
                },
                Action::Quit => return Ok(RoundEnd::Quit),
            }
        }
    }

    /// Writes the current board and turn to the store.
    ///
    /// A failed write is reported to the interface and otherwise ignored.
    #[instrument(skip(self))]
    pub fn save_snapshot(&mut self) -> Result<()> {
        let record = SaveRecord::capture(&self.state);
        match self.store.save(&record) {
            Ok(()) => self.io.show(&GameEvent::Saved),
            Err(e) => {
                warn!(error = %e, "Save failed");
                self.io.show(&GameEvent::SaveFailed(e))
            }
        }
    }

    /// Replaces the current round with the stored one, keeping counters.
    ///
    /// Returns whether a round was loaded. A missing or malformed snapshot
    /// is reported to the interface and leaves the current round untouched.
    #[instrument(skip(self))]
    pub fn load_snapshot(&mut self) -> Result<bool> {
        match self.store.load() {
            Ok(Some(record)) => {
                self.state = GameState::resume(&record, *self.state.scoreboard());
                info!(to_move = %record.current_player(), "Resumed saved round");
                self.io.show(&GameEvent::Loaded)?;
                Ok(true)
            }
            Ok(None) => {
                self.io.show(&GameEvent::NoSavedGame)?;
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "Load failed");
                self.io.show(&GameEvent::LoadFailed(e))?;
                Ok(false)
            }
        }
    }

    fn place(&mut self, player: Player, position: Position) -> Result<()> {
        match self.state.apply_move(position.index()) {
            Ok(_) => self.io.show(&GameEvent::MoveMade {
                played: Move::new(player, position),
                computer: false,
            }),
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.io.show(&GameEvent::MoveRejected(e))
            }
        }
    }
}
