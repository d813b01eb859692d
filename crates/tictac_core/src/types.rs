//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two symbols placed on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Symbol X.
    X,
    /// Symbol O.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell coordinate on the 3x3 grid.
///
/// `x` is the column and `y` the row, both in `0..3`. The row-major
/// index is `y * 3 + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("({x}, {y})")]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    /// All nine cells in row-major order.
    pub const ALL: [Coord; 9] = [
        Coord { x: 0, y: 0 },
        Coord { x: 1, y: 0 },
        Coord { x: 2, y: 0 },
        Coord { x: 0, y: 1 },
        Coord { x: 1, y: 1 },
        Coord { x: 2, y: 1 },
        Coord { x: 0, y: 2 },
        Coord { x: 1, y: 2 },
        Coord { x: 2, y: 2 },
    ];

    /// Top-left cell, where the cursor starts.
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    /// Creates a coordinate, or `None` when either component is outside `0..3`.
    pub fn new(x: usize, y: usize) -> Option<Self> {
        if x < 3 && y < 3 {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Creates a coordinate from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column, 0-2.
    pub fn x(self) -> usize {
        self.x as usize
    }

    /// Row, 0-2.
    pub fn y(self) -> usize {
        self.y as usize
    }

    /// Row-major index, 0-8.
    pub fn index(self) -> usize {
        self.y() * 3 + self.x()
    }

    /// Returns the neighbouring cell one step away, wrapping around the edges.
    #[instrument]
    pub fn wrapping_step(self, direction: Direction) -> Self {
        let (x, y) = (self.x, self.y);
        let (x, y) = match direction {
            Direction::Up => (x, (y + 2) % 3),
            Direction::Down => (x, (y + 1) % 3),
            Direction::Left => ((x + 2) % 3, y),
            Direction::Right => ((x + 1) % 3, y),
        };
        Self { x, y }
    }
}

/// A single cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards row 2.
    Down,
    /// Towards column 0.
    Left,
    /// Towards column 2.
    Right,
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Holds a mark.
    Occupied(Mark),
}

/// 3x3 board indexed by [`Coord`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from rows, `rows[y][x]`.
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Self {
        Self { cells: rows }
    }

    /// Returns the cell at `at`.
    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.y()][at.x()]
    }

    /// Checks whether the cell at `at` is empty.
    pub fn is_empty(&self, at: Coord) -> bool {
        self.get(at) == Cell::Empty
    }

    /// Returns the rows, `rows()[y][x]`.
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    pub(crate) fn set(&mut self, at: Coord, cell: Cell) {
        self.cells[at.y()][at.x()] = cell;
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => ".".to_string(),
                        Cell::Occupied(mark) => mark.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n-+-+-\n")
    }
}

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still accepted.
    #[default]
    Running,
    /// No line can be completed by anyone.
    Draw,
    /// A mark completed a line.
    Won(Mark),
}

impl GameStatus {
    /// Checks whether the match has ended.
    pub fn is_over(self) -> bool {
        self != GameStatus::Running
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Running => write!(f, "running"),
            GameStatus::Draw => write!(f, "draw"),
            GameStatus::Won(mark) => write!(f, "{} wins", mark),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_coord_index_roundtrip() {
        for (i, coord) in Coord::ALL.iter().enumerate() {
            assert_eq!(coord.index(), i);
            assert_eq!(Coord::from_index(i), Some(*coord));
        }
        assert_eq!(Coord::from_index(9), None);
        assert_eq!(Coord::new(3, 0), None);
    }

    #[test]
    fn test_wrapping_step() {
        let origin = Coord::ORIGIN;
        assert_eq!(origin.wrapping_step(Direction::Up), Coord::new(0, 2).unwrap());
        assert_eq!(origin.wrapping_step(Direction::Left), Coord::new(2, 0).unwrap());
        assert_eq!(origin.wrapping_step(Direction::Right), Coord::new(1, 0).unwrap());
        assert_eq!(origin.wrapping_step(Direction::Down), Coord::new(0, 1).unwrap());
    }

    #[test]
    fn test_mark_parse() {
        assert_eq!(Mark::from_str("x").unwrap(), Mark::X);
        assert_eq!(Mark::from_str("O").unwrap(), Mark::O);
        assert_eq!(Mark::X.opponent(), Mark::O);
    }

    #[test]
    fn test_board_display() {
        let mut board = Board::new();
        board.set(Coord::ORIGIN, Cell::Occupied(Mark::X));
        assert!(board.display().starts_with("X|.|."));
    }
}
