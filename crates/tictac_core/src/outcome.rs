//! Win and forced-draw detection.
//!
//! A draw is declared as soon as no free cell lies on a line that either
//! mark could still complete in the moves left, not only when the board
//! is full.

use crate::bitboard::{Mask, Occupancy, WIN_LINES, lines_through};
use crate::types::{Board, GameStatus, Mark};
use tracing::{debug, instrument, trace};

/// Fewest moves before anyone can complete a line.
pub const FIRST_POSSIBLE_WIN: u8 = 5;

/// Fewest moves before a draw can be forced.
pub const FIRST_POSSIBLE_DRAW: u8 = 6;

/// Marks `mark` must already hold on a line for it to still be completable.
///
/// The starter places at most five marks in a full game and the other
/// mark four. Whatever is left of that allowance after `moves` plies is
/// how many more marks can go on any one line, so the line needs
/// `3 - movesLeft` marks already.
#[instrument]
pub fn min_moves(is_starter: bool, moves: u8) -> u8 {
    let moves_left = if is_starter {
        5u8.saturating_sub(moves - moves / 2)
    } else {
        4u8.saturating_sub(moves / 2)
    };
    3u8.saturating_sub(moves_left)
}

/// Returns the mark holding a completed line, if any.
///
/// # Panics
///
/// Panics if both marks hold a completed line. Alternating play cannot
/// reach such a board and [`GameState::from_cells`](crate::GameState::from_cells)
/// refuses to build one.
#[instrument]
pub fn winner(occupancy: &Occupancy) -> Option<Mark> {
    let x_line = !occupancy.x.winning_lines().is_empty();
    let o_line = !occupancy.o.winning_lines().is_empty();
    assert!(
        !(x_line && o_line),
        "both marks hold a completed line: x={} o={}",
        occupancy.x,
        occupancy.o
    );
    match (x_line, o_line) {
        (true, _) => Some(Mark::X),
        (_, true) => Some(Mark::O),
        _ => None,
    }
}

/// Checks whether `mine` can still complete `line` given how many marks it
/// needs there already.
fn can_complete(line: Mask, mine: Mask, theirs: Mask, needed: u8) -> bool {
    let mine = mine & line;
    let theirs = theirs & line;
    mine.is_pure_against(theirs) && mine.count() >= needed as usize
}

/// Checks whether any free cell still sits on a line either mark can complete.
#[instrument(skip(occupancy))]
fn any_line_open(occupancy: &Occupancy, moves: u8, starter: Mark) -> bool {
    let x_needed = min_moves(starter == Mark::X, moves);
    let o_needed = min_moves(starter == Mark::O, moves);
    trace!(x_needed, o_needed, "Minimum marks per line");

    occupancy.free.coords().any(|cell| {
        lines_through(cell).any(|i| {
            let line = WIN_LINES[i];
            can_complete(line, occupancy.x, occupancy.o, x_needed)
                || can_complete(line, occupancy.o, occupancy.x, o_needed)
        })
    })
}

/// Decides the status of `board` after `moves` plies, `starter` having
/// moved first.
#[instrument(skip(board))]
pub fn detect(board: &Board, moves: u8, starter: Mark) -> GameStatus {
    if moves < FIRST_POSSIBLE_WIN {
        return GameStatus::Running;
    }

    let occupancy = Occupancy::from_board(board);

    if let Some(mark) = winner(&occupancy) {
        debug!(%mark, moves, "Line completed");
        return GameStatus::Won(mark);
    }

    if moves < FIRST_POSSIBLE_DRAW {
        return GameStatus::Running;
    }

    if any_line_open(&occupancy, moves, starter) {
        GameStatus::Running
    } else {
        debug!(moves, "No line left to complete");
        GameStatus::Draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Coord};

    const E: Cell = Cell::Empty;
    const X: Cell = Cell::Occupied(Mark::X);
    const O: Cell = Cell::Occupied(Mark::O);

    fn occupied(board: &Board) -> u8 {
        Coord::ALL.iter().filter(|c| !board.is_empty(**c)).count() as u8
    }

    #[test]
    fn test_min_moves_table() {
        // starter: 6 -> 1, 7 -> 2, 8 -> 2, 9 -> 3
        assert_eq!(min_moves(true, 6), 1);
        assert_eq!(min_moves(true, 7), 2);
        assert_eq!(min_moves(true, 8), 2);
        assert_eq!(min_moves(true, 9), 3);
        // second player: 6 -> 2, 7 -> 2, 8 -> 3, 9 -> 3
        assert_eq!(min_moves(false, 6), 2);
        assert_eq!(min_moves(false, 7), 2);
        assert_eq!(min_moves(false, 8), 3);
        assert_eq!(min_moves(false, 9), 3);
        // Early in the game nothing is required yet.
        assert_eq!(min_moves(true, 0), 0);
        assert_eq!(min_moves(false, 1), 0);
    }

    #[test]
    fn test_early_exit_before_fifth_move() {
        let board = Board::from_rows([[X, X, X], [O, E, E], [E, E, E]]);
        assert_eq!(detect(&board, 4, Mark::X), GameStatus::Running);
    }

    #[test]
    fn test_win_detected() {
        let board = Board::from_rows([[X, X, X], [O, O, E], [E, E, E]]);
        assert_eq!(detect(&board, occupied(&board), Mark::X), GameStatus::Won(Mark::X));

        let board = Board::from_rows([[X, X, O], [E, O, E], [O, X, X]]);
        assert_eq!(detect(&board, occupied(&board), Mark::X), GameStatus::Won(Mark::O));
    }

    #[test]
    fn test_full_board_draw() {
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, X]]);
        assert_eq!(occupied(&board), 9);
        assert_eq!(detect(&board, 9, Mark::X), GameStatus::Draw);
    }

    #[test]
    fn test_forced_draw_before_board_fills() {
        // The last free cell, (2, 2), sits only on mixed lines.
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, E]]);
        assert_eq!(detect(&board, 8, Mark::X), GameStatus::Draw);
    }

    #[test]
    fn test_open_line_keeps_running() {
        // Column 2 holds a lone X and two free cells.
        let board = Board::from_rows([[X, O, X], [E, O, E], [O, X, E]]);
        assert_eq!(detect(&board, 6, Mark::X), GameStatus::Running);
    }

    #[test]
    fn test_draw_depends_on_starter() {
        // Bottom row X X . needs one more X. Only the starter still has one.
        let board = Board::from_rows([[X, O, O], [O, O, X], [X, X, E]]);
        assert_eq!(occupied(&board), 8);
        assert_eq!(detect(&board, 8, Mark::X), GameStatus::Running);
        assert_eq!(detect(&board, 8, Mark::O), GameStatus::Draw);
    }

    #[test]
    fn test_no_draw_before_sixth_move() {
        let board = Board::from_rows([[X, O, X], [O, X, E], [E, E, E]]);
        assert_eq!(detect(&board, 5, Mark::X), GameStatus::Running);
    }

    #[test]
    #[should_panic(expected = "both marks")]
    fn test_double_win_panics() {
        let board = Board::from_rows([[X, X, X], [O, O, O], [E, E, E]]);
        winner(&Occupancy::from_board(&board));
    }
}
