//! The snapshot shared between the turn engine, strategies and renderers.

use crate::bitboard::{Mask, Occupancy};
use crate::error::PositionError;
use crate::outcome;
use crate::types::{Board, Cell, Coord, GameStatus, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Complete state of one match.
///
/// Only [`Game`](crate::Game) mutates it; everyone else reads it.
/// Deserializing goes through [`GameState::from_cells`], so a stored
/// snapshot is held to the same checks as a hand-built one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredState")]
pub struct GameState {
    board: Board,
    turn: Mark,
    starter: Mark,
    cursor: Coord,
    moves: u8,
    status: GameStatus,
}

/// Wire form of [`GameState`] before validation.
#[derive(Deserialize)]
struct StoredState {
    board: Board,
    turn: Mark,
    starter: Mark,
    cursor: Coord,
    moves: u8,
    status: GameStatus,
}

impl TryFrom<StoredState> for GameState {
    type Error = PositionError;

    fn try_from(stored: StoredState) -> Result<Self, Self::Error> {
        let mut state = GameState::from_cells(*stored.board.rows(), stored.starter)?;
        if (state.turn, state.moves, state.status) != (stored.turn, stored.moves, stored.status) {
            return Err(PositionError::new(format!(
                "stored turn {}, moves {} and status {} disagree with the board",
                stored.turn, stored.moves, stored.status
            )));
        }
        state.cursor = stored.cursor;
        Ok(state)
    }
}

impl GameState {
    /// Creates an empty board with `starter` to move first.
    #[instrument]
    pub fn new(starter: Mark) -> Self {
        Self {
            board: Board::new(),
            turn: starter,
            starter,
            cursor: Coord::ORIGIN,
            moves: 0,
            status: GameStatus::Running,
        }
    }

    /// Builds a state from a grid, `rows[y][x]`, that `starter` opened.
    ///
    /// The move counter is the number of occupied cells, the turn follows
    /// from alternation and the status is evaluated from scratch.
    ///
    /// # Errors
    ///
    /// Rejects grids whose mark counts could not come from alternating play
    /// starting with `starter`, and grids where both marks hold a line.
    #[instrument(skip(rows))]
    pub fn from_cells(rows: [[Cell; 3]; 3], starter: Mark) -> Result<Self, PositionError> {
        let board = Board::from_rows(rows);
        let occupancy = Occupancy::from_board(&board);
        let started = occupancy.of(starter).count();
        let second = occupancy.of(starter.opponent()).count();

        if started != second && started != second + 1 {
            return Err(PositionError::new(format!(
                "{} opened with {} marks against {}",
                starter, started, second
            )));
        }
        if !occupancy.x.winning_lines().is_empty() && !occupancy.o.winning_lines().is_empty() {
            return Err(PositionError::new("both marks hold a completed line"));
        }

        let moves = (started + second) as u8;
        let turn = if started == second {
            starter
        } else {
            starter.opponent()
        };
        let status = outcome::detect(&board, moves, starter);
        debug!(moves, %turn, %status, "Position built");

        Ok(Self {
            board,
            turn,
            starter,
            cursor: Coord::ORIGIN,
            moves,
            status,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the mark that opened the match.
    pub fn starter(&self) -> Mark {
        self.starter
    }

    /// Returns the selected cell.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Returns how many marks have been placed.
    pub fn moves(&self) -> u8 {
        self.moves
    }

    /// Returns the match status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Splits the board into free, X and O masks.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_board(&self.board)
    }

    /// Cells a renderer should emphasise.
    ///
    /// The winning lines once someone has won, every occupied cell on a draw
    /// and the cursor while the match runs.
    #[instrument(skip(self))]
    pub fn highlight(&self) -> Mask {
        let occupancy = self.occupancy();
        match self.status {
            GameStatus::Running => Mask::single(self.cursor),
            GameStatus::Draw => occupancy.occupied(),
            GameStatus::Won(mark) => occupancy.of(mark).winning_lines(),
        }
    }

    pub(crate) fn set_cursor(&mut self, cursor: Coord) {
        self.cursor = cursor;
    }

    /// Writes the current mark at `at`, hands the turn over and counts the move.
    pub(crate) fn place_mark(&mut self, at: Coord) {
        self.board.set(at, Cell::Occupied(self.turn));
        self.turn = self.turn.opponent();
        self.moves += 1;
    }

    /// Re-runs outcome detection. A finished match stays finished.
    pub(crate) fn refresh_status(&mut self) {
        if self.status.is_over() {
            return;
        }
        self.status = outcome::detect(&self.board, self.moves, self.starter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Cell = Cell::Empty;
    const X: Cell = Cell::Occupied(Mark::X);
    const O: Cell = Cell::Occupied(Mark::O);

    #[test]
    fn test_from_cells_derives_turn_and_moves() {
        let state = GameState::from_cells([[X, E, E], [E, O, E], [X, E, E]], Mark::X).unwrap();
        assert_eq!(state.moves(), 3);
        assert_eq!(state.turn(), Mark::O);
        assert_eq!(state.starter(), Mark::X);
        assert_eq!(state.status(), GameStatus::Running);

        let state = GameState::from_cells([[O, E, E], [E, X, E], [E, E, E]], Mark::O).unwrap();
        assert_eq!(state.turn(), Mark::O);
    }

    #[test]
    fn test_from_cells_rejects_bad_counts() {
        let result = GameState::from_cells([[X, X, E], [E, E, E], [E, E, E]], Mark::X);
        assert!(result.is_err());

        let result = GameState::from_cells([[X, E, E], [E, E, E], [E, E, E]], Mark::O);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_cells_rejects_double_win() {
        let result = GameState::from_cells([[X, X, X], [O, O, O], [E, E, E]], Mark::X);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_cells_status_depends_on_starter() {
        // X to move with one mark left can still fill the bottom row.
        let rows = [[X, O, O], [O, O, X], [X, X, E]];
        let opened_by_x = GameState::from_cells(rows, Mark::X).unwrap();
        let opened_by_o = GameState::from_cells(rows, Mark::O).unwrap();
        assert_eq!(opened_by_x.moves(), 8);
        assert_eq!(opened_by_x.status(), GameStatus::Running);
        assert_eq!(opened_by_o.status(), GameStatus::Draw);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut state = GameState::from_cells([[X, O, E], [E, X, E], [E, E, O]], Mark::X).unwrap();
        state.set_cursor(Coord::new(2, 1).unwrap());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_deserialize_rejects_double_win() {
        let mut json = serde_json::to_value(GameState::new(Mark::X)).unwrap();
        json["board"] = serde_json::to_value(Board::from_rows([[X, X, X], [O, O, O], [E, E, E]]))
            .unwrap();
        json["moves"] = 6.into();
        let result = serde_json::from_value::<GameState>(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("both marks"), "unexpected error: {err}");
    }

    #[test]
    fn test_deserialize_rejects_mismatched_status() {
        let state = GameState::from_cells([[X, X, X], [O, O, E], [E, E, E]], Mark::X).unwrap();
        let mut json = serde_json::to_value(&state).unwrap();
        json["status"] = serde_json::to_value(GameStatus::Running).unwrap();
        assert!(serde_json::from_value::<GameState>(json).is_err());
    }

    #[test]
    fn test_highlight() {
        let state = GameState::new(Mark::X);
        assert_eq!(state.highlight(), Mask::single(Coord::ORIGIN));

        let state = GameState::from_cells([[X, X, X], [O, O, E], [E, E, E]], Mark::X).unwrap();
        assert_eq!(state.status(), GameStatus::Won(Mark::X));
        assert_eq!(state.highlight(), Mask::from_bits(0o007));

        let state = GameState::from_cells([[X, O, X], [X, O, O], [O, X, X]], Mark::X).unwrap();
        assert_eq!(state.status(), GameStatus::Draw);
        assert_eq!(state.highlight(), Mask::FULL);
    }
}
