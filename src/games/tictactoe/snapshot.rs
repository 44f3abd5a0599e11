//! Persisted snapshots of a round in progress.
//!
//! The text form is two lines:
//!
//! ```text
//! XO  X   O
//! X
//! ```
//!
//! Line 1 holds exactly nine cells in index order (space, `X` or `O`);
//! line 2 holds the player to move. Move history and counters are not
//! saved.

use super::game::GameState;
use super::types::{Board, Outcome, Player, Square};
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Board and turn needed to resume a round.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SaveRecord {
    /// The board.
    board: Board,
    /// Player to move.
    current_player: Player,
}

impl SaveRecord {
    /// Captures the board and turn of a round.
    #[instrument(skip(state))]
    pub fn capture(state: &GameState) -> Self {
        Self {
            board: state.board().clone(),
            current_player: *state.current_player(),
        }
    }
}

impl std::fmt::Display for SaveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: String = self.board.squares().iter().map(|s| s.symbol()).collect();
        writeln!(f, "{}", cells)?;
        writeln!(f, "{}", self.current_player.symbol())
    }
}

impl FromStr for SaveRecord {
    type Err = MalformedSnapshot;

    /// Parses the two-line text form. Nothing is returned unless every
    /// check passes.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text.lines();

        let cells = lines.next().ok_or(MalformedSnapshot::MissingLine { line: 1 })?;
        let symbols: Vec<char> = cells.chars().collect();
        let symbols: [char; 9] = symbols
            .try_into()
            .map_err(|found: Vec<char>| MalformedSnapshot::BoardLength { found: found.len() })?;

        let mut squares = [Square::Empty; 9];
        for (index, (square, symbol)) in squares.iter_mut().zip(symbols).enumerate() {
            *square = Square::from_symbol(symbol)
                .ok_or(MalformedSnapshot::InvalidCell { index, symbol })?;
        }
        let board = Board::from_squares(squares);

        let turn = lines.next().ok_or(MalformedSnapshot::MissingLine { line: 2 })?;
        let mut turn_chars = turn.chars();
        let current_player = match (turn_chars.next(), turn_chars.next()) {
            (Some(symbol), None) => Player::from_symbol(symbol),
            _ => None,
        }
        .ok_or_else(|| MalformedSnapshot::InvalidPlayer {
            found: turn.to_string(),
        })?;

        let outcome = board.outcome();
        if outcome.is_decided() {
            return Err(MalformedSnapshot::Decided { outcome });
        }

        Ok(Self {
            board,
            current_player,
        })
    }
}

/// Why a snapshot could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MalformedSnapshot {
    /// The file ended early.
    #[display("line {line} is missing")]
    MissingLine {
        /// 1-based line number.
        line: usize,
    },

    /// The board line does not hold nine cells.
    #[display("board line has {found} characters, expected 9")]
    BoardLength {
        /// Characters found.
        found: usize,
    },

    /// A cell holds something other than a space, `X` or `O`.
    #[display("cell {} holds {symbol:?}, expected ' ', 'X' or 'O'", index + 1)]
    InvalidCell {
        /// 0-based cell index.
        index: usize,
        /// The offending character.
        symbol: char,
    },

    /// The turn line is not exactly `X` or `O`.
    #[display("player line {found:?} is not 'X' or 'O'")]
    InvalidPlayer {
        /// The whole line.
        found: String,
    },

    /// The board has no moves left to resume.
    #[display("board is already decided ({outcome})")]
    Decided {
        /// Outcome on the saved board.
        outcome: Outcome,
    },
}

/// Snapshot persistence failure.
#[derive(Debug, Display, Error, From)]
pub enum SnapshotError {
    /// The stored text is not a valid snapshot.
    #[display("malformed snapshot: {_0}")]
    Malformed(MalformedSnapshot),

    /// Reading or writing the store failed.
    #[display("snapshot I/O failed: {_0}")]
    Io(std::io::Error),
}

/// Where snapshots are kept.
pub trait SnapshotStore {
    /// Writes a snapshot, replacing any previous one.
    fn save(&self, record: &SaveRecord) -> Result<(), SnapshotError>;

    /// Reads the stored snapshot; `Ok(None)` when nothing was saved.
    fn load(&self) -> Result<Option<SaveRecord>, SnapshotError>;
}

/// Snapshot store backed by a single text file.
#[derive(Debug, Clone, Getters)]
pub struct FileStore {
    /// File holding the snapshot.
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the given file. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileStore {
    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    fn save(&self, record: &SaveRecord) -> Result<(), SnapshotError> {
        std::fs::write(&self.path, record.to_string())?;
        info!("Snapshot saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<SaveRecord>, SnapshotError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let record = text.parse::<SaveRecord>().inspect_err(|e| {
            warn!(error = %e, "Rejected snapshot");
        })?;
        info!(player = %record.current_player, "Snapshot loaded");
        Ok(Some(record))
    }
}
