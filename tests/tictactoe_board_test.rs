//! Tests for the board and its terminal-state queries.

use std::collections::HashSet;
use strictly_noughts::{Board, GameState, OutOfRange, Outcome, Phase, Player, Position, Square};

fn board_from(marks: &str) -> Board {
    let mut squares = [Square::Empty; 9];
    for (square, symbol) in squares.iter_mut().zip(marks.chars()) {
        *square = Square::from_symbol(symbol).expect("test board symbol");
    }
    Board::from_squares(squares)
}

/// Every board reachable from an empty one by legal play.
fn reachable_boards() -> HashSet<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![GameState::new()];
    while let Some(state) = stack.pop() {
        if !seen.insert(state.board().clone()) {
            continue;
        }
        if let Phase::AwaitingMove(_) = state.phase() {
            for position in Position::valid_moves(state.board()) {
                let mut next = state.clone();
                next.apply_move(position.index()).unwrap();
                stack.push(next);
            }
        }
    }
    seen
}

#[test]
fn test_is_empty_checks_range() {
    let mut board = Board::new();
    board.place(Position::Center, Player::X);

    assert_eq!(board.is_empty(0), Ok(true));
    assert_eq!(board.is_empty(4), Ok(false));
    assert_eq!(board.is_empty(9), Err(OutOfRange { index: 9 }));
}

#[test]
fn test_clear_resets_square() {
    let mut board = Board::new();
    board.place(Position::TopRight, Player::O);
    board.clear(Position::TopRight);
    assert_eq!(board, Board::new());
}

#[test]
fn test_diagonal_win_is_reported() {
    let board = board_from("XOXOXO  X");
    assert_eq!(board.winning_line(), Some(Player::X));
    assert_eq!(board.outcome(), Outcome::Win(Player::X));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board = board_from("XOXXOOOXX");
    assert!(board.is_full());
    assert_eq!(board.winning_line(), None);
    assert_eq!(board.outcome(), Outcome::Draw);
}

#[test]
fn test_win_on_last_square_beats_draw() {
    let board = board_from("XOXOXOOXX");
    assert!(board.is_full());
    assert_eq!(board.outcome(), Outcome::Win(Player::X));
}

#[test]
fn test_reachable_boards_never_have_two_winners() {
    let boards = reachable_boards();
    assert_eq!(boards.len(), 5478);

    for board in boards {
        let x_line = strictly_noughts::LINES
            .iter()
            .any(|line| line.iter().all(|p| board.get(*p) == Square::Occupied(Player::X)));
        let o_line = strictly_noughts::LINES
            .iter()
            .any(|line| line.iter().all(|p| board.get(*p) == Square::Occupied(Player::O)));
        assert!(!(x_line && o_line), "both players won on\n{board}");
    }
}

#[test]
fn test_display_numbers_empty_cells() {
    let mut board = Board::new();
    board.place(Position::TopLeft, Player::X);
    board.place(Position::Center, Player::O);

    assert_eq!(
        board.to_string(),
        " X | 2 | 3 \n-----------\n 4 | O | 6 \n-----------\n 7 | 8 | 9 "
    );
}

#[test]
fn test_valid_moves_filters_occupied() {
    let mut board = Board::new();
    board.place(Position::TopLeft, Player::X);
    board.place(Position::Center, Player::O);

    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7);
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}

#[test]
fn test_position_numbering() {
    assert_eq!(Position::from_number(1), Some(Position::TopLeft));
    assert_eq!(Position::from_number(9), Some(Position::BottomRight));
    assert_eq!(Position::from_number(0), None);
    assert_eq!(Position::from_index(9), None);
    assert_eq!(Position::Center.index(), 4);
    assert_eq!(Position::Center.number(), 5);
}
