//! Core domain types for tic-tac-toe.

use super::position::Position;
use super::rules;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark this player writes on the board.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Parses a player mark. Only the upper-case letters are accepted.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'X' => Some(Player::X),
            'O' => Some(Player::O),
            _ => None,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Persisted symbol: a space for empty, otherwise the player's mark.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Inverse of [`Square::symbol`].
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' => Some(Square::Empty),
            other => Player::from_symbol(other).map(Square::Occupied),
        }
    }
}

/// A raw cell index that does not name one of the nine squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Cell index {index} is outside 0-8")]
pub struct OutOfRange {
    /// The rejected index.
    pub index: usize,
}

/// 3x3 tic-tac-toe board.
///
/// The board performs no legality checks of its own: callers confirm a
/// square is vacant before placing a mark on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Checks if the square at a raw index (0-8) is empty.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] when `index` is not a board cell.
    pub fn is_empty(&self, index: usize) -> Result<bool, OutOfRange> {
        let pos = Position::from_index(index).ok_or(OutOfRange { index })?;
        Ok(self.is_vacant(pos))
    }

    /// Checks if the square at a position is empty.
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Places a player's mark on a vacant square.
    pub fn place(&mut self, pos: Position, player: Player) {
        debug_assert!(self.is_vacant(pos), "{pos} is already occupied");
        self.squares[pos.index()] = Square::Occupied(player);
    }

    /// Resets a square to empty.
    pub fn clear(&mut self, pos: Position) {
        self.squares[pos.index()] = Square::Empty;
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the player owning a completed line, if any.
    pub fn winning_line(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Derives the outcome from the marks on the board.
    pub fn outcome(&self) -> Outcome {
        rules::outcome(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Three rows of cells; empty cells show their 1-9 number.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pos in Position::ALL {
            match self.get(pos) {
                Square::Empty => write!(f, " {} ", pos.number())?,
                Square::Occupied(player) => write!(f, " {} ", player)?,
            }
            match pos.index() % 3 {
                2 if pos.index() != 8 => f.write_str("\n-----------\n")?,
                2 => {}
                _ => f.write_str("|")?,
            }
        }
        Ok(())
    }
}

/// State of a round, always recomputed from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and at least one empty square.
    InProgress,
    /// Player completed a line.
    Win(Player),
    /// Board full with no line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// True once the round can accept no further moves.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Per-run tally of finished rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Scoreboard {
    /// Rounds won by X.
    x_wins: u32,
    /// Rounds won by O.
    o_wins: u32,
    /// Rounds drawn.
    draws: u32,
}

impl Scoreboard {
    /// Counts one finished round. Undecided outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Player::X) => self.x_wins += 1,
            Outcome::Win(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    /// Total rounds counted.
    pub fn rounds(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Player X - {}, Player O - {}, Draws - {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}
