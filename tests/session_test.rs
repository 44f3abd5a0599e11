//! Tests for round orchestration with scripted players.

use anyhow::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use strictly_noughts::{
    Action, Board, ConsoleIo, GameEvent, GameIo, Mode, Outcome, Phase, Player, Position, RoundEnd,
    SaveRecord, Session, SnapshotError, SnapshotStore,
};

/// Replays a fixed list of actions and answers; quits when they run out.
#[derive(Default)]
struct ScriptedIo {
    actions: VecDeque<Action>,
    answers: VecDeque<bool>,
    events: Vec<&'static str>,
    computer_moves: Vec<Position>,
}

impl ScriptedIo {
    fn new(
        actions: impl IntoIterator<Item = Action>,
        answers: impl IntoIterator<Item = bool>,
    ) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| **e == kind).count()
    }
}

impl GameIo for ScriptedIo {
    fn show(&mut self, event: &GameEvent) -> Result<()> {
        let kind = match event {
            GameEvent::TurnStarted { .. } => "turn",
            GameEvent::MoveMade { played, computer } => {
                if *computer {
                    self.computer_moves.push(played.position);
                }
                "move"
            }
            GameEvent::MoveRejected(_) => "rejected",
            GameEvent::Undone(_) => "undone",
            GameEvent::Saved => "saved",
            GameEvent::SaveFailed(_) => "save_failed",
            GameEvent::Loaded => "loaded",
            GameEvent::NoSavedGame => "no_saved_game",
            GameEvent::LoadFailed(_) => "load_failed",
            GameEvent::RoundOver { .. } => "round_over",
        };
        self.events.push(kind);
        Ok(())
    }

    fn next_action(&mut self, _board: &Board, _player: Player) -> Result<Action> {
        Ok(self.actions.pop_front().unwrap_or(Action::Quit))
    }

    fn play_again(&mut self) -> Result<bool> {
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// Keeps the snapshot text in memory.
#[derive(Default)]
struct MemoryStore {
    text: RefCell<Option<String>>,
}

impl MemoryStore {
    fn with_text(text: &str) -> Self {
        Self {
            text: RefCell::new(Some(text.to_string())),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, record: &SaveRecord) -> Result<(), SnapshotError> {
        *self.text.borrow_mut() = Some(record.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveRecord>, SnapshotError> {
        match self.text.borrow().as_deref() {
            Some(text) => Ok(Some(text.parse()?)),
            None => Ok(None),
        }
    }
}

fn places(numbers: &[usize]) -> Vec<Action> {
    numbers
        .iter()
        .map(|n| Action::Place(Position::from_number(*n).unwrap()))
        .collect()
}

#[test]
fn test_two_player_round_to_a_win() {
    // X takes the top row.
    let io = ScriptedIo::new(places(&[1, 4, 2, 5, 3]), [false]);
    let mut session = Session::new(io, MemoryStore::default(), Mode::TwoPlayer);

    let scoreboard = session.run().unwrap();
    assert_eq!(*scoreboard.x_wins(), 1);
    assert_eq!(scoreboard.rounds(), 1);
    assert_eq!(session.io().count("round_over"), 1);
}

#[test]
fn test_occupied_cell_is_reported_and_same_player_retries() {
    let mut actions = places(&[5, 5]);
    actions.extend(places(&[1]));
    let io = ScriptedIo::new(actions, []);
    let mut session = Session::new(io, MemoryStore::default(), Mode::TwoPlayer);

    assert_eq!(session.play_round().unwrap(), RoundEnd::Quit);
    assert_eq!(session.io().count("rejected"), 1);
    assert!(!session.state().board().is_vacant(Position::TopLeft));
    assert_eq!(session.state().phase(), Phase::AwaitingMove(Player::X));
}

#[test]
fn test_undo_returns_turn_to_mover() {
    let mut actions = places(&[5, 1]);
    actions.push(Action::Undo);
    actions.push(Action::Undo);
    let io = ScriptedIo::new(actions, []);
    let mut session = Session::new(io, MemoryStore::default(), Mode::TwoPlayer);

    session.play_round().unwrap();
    assert_eq!(session.io().count("undone"), 1);
    assert!(session.state().board().is_vacant(Position::TopLeft));
    assert!(!session.state().board().is_vacant(Position::Center));
    assert_eq!(session.state().phase(), Phase::AwaitingMove(Player::O));
}

#[test]
fn test_draw_then_play_again_carries_counters() {
    // X O X / X O O / O X X, then X wins the second round.
    let mut actions = places(&[1, 2, 3, 5, 4, 6, 8, 7, 9]);
    actions.extend(places(&[1, 4, 2, 5, 3]));
    let io = ScriptedIo::new(actions, [true, false]);
    let mut session = Session::new(io, MemoryStore::default(), Mode::TwoPlayer);

    let scoreboard = session.run().unwrap();
    assert_eq!(*scoreboard.draws(), 1);
    assert_eq!(*scoreboard.x_wins(), 1);
    assert_eq!(*scoreboard.o_wins(), 0);
}

#[test]
fn test_quit_skips_play_again() {
    let io = ScriptedIo::new([Action::Quit], [true]);
    let mut session = Session::new(io, MemoryStore::default(), Mode::TwoPlayer);

    let scoreboard = session.run().unwrap();
    assert_eq!(scoreboard.rounds(), 0);
    assert_eq!(session.io().answers.len(), 1);
}

#[test]
fn test_save_then_load_resumes_round() {
    let mut actions = places(&[1, 5]);
    actions.push(Action::Save);
    let io = ScriptedIo::new(actions, []);
    let mut session = Session::new(io, MemoryStore::default(), Mode::TwoPlayer);
    session.play_round().unwrap();
    assert_eq!(session.io().count("saved"), 1);
    assert_eq!(
        session.store().text.borrow().as_deref(),
        Some("X   O    \nX\n")
    );

    let saved = session.store().text.borrow().clone().unwrap();
    let mut resumed = Session::new(
        ScriptedIo::default(),
        MemoryStore::with_text(&saved),
        Mode::TwoPlayer,
    );
    assert!(resumed.load_snapshot().unwrap());
    assert_eq!(resumed.state().board(), session.state().board());
    assert_eq!(resumed.state().phase(), Phase::AwaitingMove(Player::X));
}

#[test]
fn test_malformed_snapshot_leaves_state_unchanged() {
    let io = ScriptedIo::new(places(&[5]), []);
    let mut session = Session::new(io, MemoryStore::with_text("X   O   \nX\n"), Mode::TwoPlayer);
    session.play_round().unwrap();
    let before = session.state().clone();

    assert!(!session.load_snapshot().unwrap());
    assert_eq!(session.state(), &before);
    assert_eq!(session.io().count("load_failed"), 1);
}

#[test]
fn test_missing_snapshot_is_reported() {
    let mut session = Session::new(ScriptedIo::default(), MemoryStore::default(), Mode::TwoPlayer);
    assert!(!session.load_snapshot().unwrap());
    assert_eq!(session.io().count("no_saved_game"), 1);
}

#[test]
fn test_computer_takes_center_then_blocks() {
    // X opens in a corner, then threatens the top row.
    let io = ScriptedIo::new(places(&[1, 2]), []);
    let mode = Mode::SinglePlayer {
        computer: Player::O,
    };
    let mut session = Session::new(io, MemoryStore::default(), mode);

    let scoreboard = session.run().unwrap();
    assert_eq!(scoreboard.rounds(), 0);
    assert_eq!(
        session.io().computer_moves,
        vec![Position::Center, Position::TopRight]
    );
}

#[test]
fn test_undo_against_computer_takes_back_both_marks() {
    let mut actions = places(&[1]);
    actions.push(Action::Undo);
    let io = ScriptedIo::new(actions, []);
    let mode = Mode::SinglePlayer {
        computer: Player::O,
    };
    let mut session = Session::new(io, MemoryStore::default(), mode);

    assert_eq!(session.play_round().unwrap(), RoundEnd::Quit);
    assert_eq!(session.io().count("undone"), 1);
    assert_eq!(session.io().computer_moves, vec![Position::Center]);
    assert!(session.state().board().is_vacant(Position::TopLeft));
    assert_eq!(session.state().board(), &Board::new());
    assert_eq!(session.state().phase(), Phase::AwaitingMove(Player::X));
}

#[test]
fn test_undo_against_computer_lets_human_choose_again() {
    let mut actions = places(&[1]);
    actions.push(Action::Undo);
    actions.extend(places(&[5]));
    let io = ScriptedIo::new(actions, []);
    let mode = Mode::SinglePlayer {
        computer: Player::O,
    };
    let mut session = Session::new(io, MemoryStore::default(), mode);
    session.play_round().unwrap();

    let board = session.state().board();
    assert!(board.is_vacant(Position::TopLeft));
    assert!(!board.is_vacant(Position::Center));
    assert_eq!(session.io().computer_moves.len(), 2);
    assert_eq!(session.io().computer_moves[1], Position::TopLeft);
}

#[test]
fn test_resumed_round_lets_computer_move_first() {
    let mode = Mode::SinglePlayer {
        computer: Player::O,
    };
    let mut session = Session::new(
        ScriptedIo::default(),
        MemoryStore::with_text("X        \nO\n"),
        mode,
    );
    session.load_snapshot().unwrap();
    session.play_round().unwrap();

    assert_eq!(session.io().computer_moves, vec![Position::Center]);
}

#[test]
fn test_console_game_over_text() {
    let input = "1\n4\n2\n5\n3\nn\n";
    let console = ConsoleIo::new(input.as_bytes(), Vec::new(), false);
    let mut session = Session::new(console, MemoryStore::default(), Mode::TwoPlayer);

    session.run().unwrap();
    assert_eq!(session.state().outcome(), Outcome::Win(Player::X));

    let text = String::from_utf8(session.io().output().clone()).unwrap();
    assert!(text.contains("Player X won!"));
    assert!(text.contains("Score: Player X - 1, Player O - 0, Draws - 0"));
    assert!(text.contains("Do you want to play again? (y/n): "));
}
