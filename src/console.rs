//! Line-oriented terminal interface.
//!
//! Reads commands from any [`BufRead`] and draws to any [`Write`], so the
//! same code drives stdin/stdout and scripted test input.

use crate::games::tictactoe::{Action, Board, MoveError, Outcome, Player, Position};
use crate::session::{GameEvent, GameIo};
use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use derive_more::{Display, Error};
use std::io::{BufRead, Write};
use tracing::{debug, instrument};

const MOVE_PROMPT: &str =
    "Enter a cell number (1-9), 'S' to save the game, 'U' to undo the last move, or 'Q' to quit: ";

/// Text that is neither a cell number nor a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{input:?} is not a cell number from 1 to 9")]
pub struct InvalidInput {
    /// The trimmed input.
    pub input: String,
}

/// Parses one line of player input.
///
/// Accepts a cell number 1-9 or one of the letters `S` (save), `U` (undo)
/// and `Q` (quit) in either case.
pub fn parse_action(line: &str) -> Result<Action, InvalidInput> {
    let input = line.trim();
    match input.to_ascii_uppercase().as_str() {
        "S" => return Ok(Action::Save),
        "U" => return Ok(Action::Undo),
        "Q" => return Ok(Action::Quit),
        _ => {}
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(Position::from_number)
        .map(Action::Place)
        .ok_or_else(|| InvalidInput {
            input: input.to_string(),
        })
}

/// Terminal implementation of [`GameIo`].
///
/// Status messages are held back and printed under the board on the next
/// redraw, so clearing the screen never hides them.
pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
    notices: Vec<String>,
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
            notices: Vec::new(),
        }
    }

    /// The output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the console, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one line; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from the terminal")?;
        Ok((read > 0).then_some(line))
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn draw_board(&mut self, board: &Board) -> Result<()> {
        if self.clear_screen {
            crossterm::queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(self.output, "Let's play Tic Tac Toe")?;
        writeln!(self.output, "Player 1: X")?;
        writeln!(self.output, "Player 2: O")?;
        writeln!(self.output)?;
        writeln!(self.output, "{board}")?;
        writeln!(self.output)?;
        Ok(())
    }

    fn flush_notices(&mut self) -> Result<()> {
        for notice in self.notices.drain(..) {
            writeln!(self.output, "{notice}")?;
        }
        self.output.flush()?;
        Ok(())
    }
}

fn rejection_message(error: &MoveError) -> String {
    match error {
        MoveError::Occupied(position) => {
            format!("Error: Cell {} is already occupied.", position.number())
        }
        other => format!("Error: {other}."),
    }
}

impl<R: BufRead, W: Write> GameIo for ConsoleIo<R, W> {
    fn show(&mut self, event: &GameEvent) -> Result<()> {
        match event {
            GameEvent::TurnStarted {
                board,
                to_move,
                computer,
            } => {
                self.draw_board(board)?;
                self.flush_notices()?;
                if *computer {
                    writeln!(self.output, "Computer ({to_move}) is thinking...")?;
                } else {
                    writeln!(self.output, "Player {to_move} to move.")?;
                }
            }
            GameEvent::MoveMade { played, computer } => {
                if *computer {
                    self.notices.push(format!(
                        "Computer ({}) took cell {}.",
                        played.player, played.position
                    ));
                }
            }
            GameEvent::MoveRejected(error) => self.notices.push(rejection_message(error)),
            GameEvent::Undone(undone) => self.notices.push(format!(
                "Took back {}'s move on cell {}.",
                undone.player,
                undone.position.number()
            )),
            GameEvent::Saved => self.notices.push("Game saved successfully.".to_string()),
            GameEvent::SaveFailed(error) => {
                self.notices.push(format!("Error: the game could not be saved: {error}"))
            }
            GameEvent::Loaded => self.notices.push("Saved game loaded.".to_string()),
            GameEvent::NoSavedGame => self.notices.push("No saved game was found!".to_string()),
            GameEvent::LoadFailed(error) => self
                .notices
                .push(format!("Error: the saved game could not be loaded: {error}")),
            GameEvent::RoundOver {
                board,
                outcome,
                scoreboard,
                elapsed,
            } => {
                self.draw_board(board)?;
                self.flush_notices()?;
                match outcome {
                    Outcome::Win(player) => writeln!(self.output, "Player {player} won!")?,
                    Outcome::Draw => writeln!(self.output, "The game ended in a draw!")?,
                    Outcome::InProgress => {}
                }
                writeln!(self.output, "Score: {scoreboard}")?;
                writeln!(self.output, "Total game time: {elapsed:.1?}")?;
            }
        }
        Ok(())
    }

    #[instrument(skip(self, _board))]
    fn next_action(&mut self, _board: &Board, player: Player) -> Result<Action> {
        loop {
            self.prompt(MOVE_PROMPT)?;
            let Some(line) = self.read_line()? else {
                debug!("End of input, quitting");
                return Ok(Action::Quit);
            };
            match parse_action(&line) {
                Ok(action) => {
                    debug!(?action, "Action read");
                    return Ok(action);
                }
                Err(e) => {
                    debug!(error = %e, "Invalid input");
                    writeln!(self.output, "Error: Please enter a valid number from 1 to 9.")?;
                }
            }
        }
    }

    #[instrument(skip(self))]
    fn play_again(&mut self) -> Result<bool> {
        self.prompt("Do you want to play again? (y/n): ")?;
        let answer = self.read_line()?.unwrap_or_default();
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}
