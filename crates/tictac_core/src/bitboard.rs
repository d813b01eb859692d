//! Nine-bit occupancy masks over the 3x3 grid.
//!
//! Bit `i` stands for the cell with row-major index `i` (`y * 3 + x`).
//! Only the low nine bits of a [`Mask`] are ever set.

use crate::types::{Board, Cell, Coord, Mark};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A set of cells packed into the low nine bits of a `u16`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    BitAnd,
    BitOr,
    BitXor,
    BitAndAssign,
    BitOrAssign,
)]
pub struct Mask(u16);

/// The eight win-lines: rows, then columns, then the two diagonals.
pub const WIN_LINES: [Mask; 8] = [
    // Rows
    Mask(0o007),
    Mask(0o070),
    Mask(0o700),
    // Columns
    Mask(0o111),
    Mask(0o222),
    Mask(0o444),
    // Diagonals
    Mask(0o421),
    Mask(0o124),
];

/// Index into [`WIN_LINES`] of the top-left to bottom-right diagonal.
pub const MAIN_DIAGONAL: usize = 6;

/// Index into [`WIN_LINES`] of the top-right to bottom-left diagonal.
pub const ANTI_DIAGONAL: usize = 7;

impl Mask {
    /// No cells.
    pub const EMPTY: Mask = Mask(0);

    /// All nine cells.
    pub const FULL: Mask = Mask(0o777);

    /// Creates a mask from raw bits, dropping anything above bit 8.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::FULL.0)
    }

    /// Creates a mask holding exactly one cell.
    pub fn single(at: Coord) -> Self {
        Self(1 << at.index())
    }

    /// Raw bits.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Checks whether no bit is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of set cells, 0-9.
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks whether the cell at `at` is set.
    pub fn contains(self, at: Coord) -> bool {
        self.0 & (1 << at.index()) != 0
    }

    /// Checks whether every cell of `other` is also in `self`.
    pub const fn contains_all(self, other: Mask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets or clears the bit for `at`.
    pub fn set(&mut self, at: Coord, bit: bool) {
        let mask = 1 << at.index();
        if bit {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Returns a copy with the bit for `at` set.
    pub fn with(mut self, at: Coord) -> Self {
        self.set(at, true);
        self
    }

    /// Set cells in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        Coord::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// Writes the set cells into `out` in row-major order and returns how many
    /// were written.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`Mask::count`].
    pub fn write_coords(self, out: &mut [Coord]) -> usize {
        let needed = self.count();
        assert!(
            out.len() >= needed,
            "coordinate buffer holds {} cells but mask has {}",
            out.len(),
            needed
        );
        for (slot, coord) in out.iter_mut().zip(self.coords()) {
            *slot = coord;
        }
        needed
    }

    /// Checks that `self` shares no cell with `other`.
    ///
    /// Seen from `self`'s owner, a line is pure when the opponent holds nothing
    /// on it: `(self | other) == self`.
    pub const fn is_pure_against(self, other: Mask) -> bool {
        self.0 | other.0 == self.0
    }

    /// Union of every win-line fully contained in this mask.
    #[instrument]
    pub fn winning_lines(self) -> Mask {
        WIN_LINES
            .iter()
            .filter(|line| self.contains_all(**line))
            .fold(Mask::EMPTY, |acc, line| acc | *line)
    }
}

impl std::fmt::Display for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:09b}", self.0)
    }
}

/// Indices into [`WIN_LINES`] of the lines passing through `at`.
///
/// Always holds the row and the column; the diagonals only when `at` lies on
/// them.
pub fn lines_through(at: Coord) -> impl Iterator<Item = usize> {
    let row = Some(at.y());
    let column = Some(at.x() + 3);
    let main = (at.x() == at.y()).then_some(MAIN_DIAGONAL);
    let anti = (at.x() + at.y() == 2).then_some(ANTI_DIAGONAL);
    [row, column, main, anti].into_iter().flatten()
}

/// The board split into free cells and the cells of each mark.
///
/// The three masks are pairwise disjoint and together cover all nine cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Empty cells.
    pub free: Mask,
    /// Cells holding X.
    pub x: Mask,
    /// Cells holding O.
    pub o: Mask,
}

impl Occupancy {
    /// Splits `board` into its three masks in a single pass.
    #[instrument(skip(board))]
    pub fn from_board(board: &Board) -> Self {
        let mut occupancy = Self {
            free: Mask::EMPTY,
            x: Mask::EMPTY,
            o: Mask::EMPTY,
        };
        for at in Coord::ALL {
            let mask = match board.get(at) {
                Cell::Empty => &mut occupancy.free,
                Cell::Occupied(Mark::X) => &mut occupancy.x,
                Cell::Occupied(Mark::O) => &mut occupancy.o,
            };
            mask.set(at, true);
        }
        occupancy
    }

    /// Cells of `mark`.
    pub fn of(&self, mark: Mark) -> Mask {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Cells holding either mark.
    pub fn occupied(&self) -> Mask {
        self.x | self.o
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: usize, y: usize) -> Coord {
        Coord::new(x, y).unwrap()
    }

    #[test]
    fn test_win_lines_have_three_cells() {
        for line in WIN_LINES {
            assert_eq!(line.count(), 3);
        }
        assert!(WIN_LINES[MAIN_DIAGONAL].contains(at(0, 0)));
        assert!(WIN_LINES[MAIN_DIAGONAL].contains(at(2, 2)));
        assert!(WIN_LINES[ANTI_DIAGONAL].contains(at(2, 0)));
        assert!(WIN_LINES[ANTI_DIAGONAL].contains(at(0, 2)));
    }

    #[test]
    fn test_occupancy_partition() {
        let mut board = Board::new();
        board.set(at(0, 0), Cell::Occupied(Mark::X));
        board.set(at(1, 1), Cell::Occupied(Mark::O));
        board.set(at(2, 2), Cell::Occupied(Mark::X));

        let occ = Occupancy::from_board(&board);
        assert_eq!(occ.x.count(), 2);
        assert_eq!(occ.o.count(), 1);
        assert_eq!(occ.free.count(), 6);
        assert!((occ.free & occ.x).is_empty());
        assert!((occ.free & occ.o).is_empty());
        assert!((occ.x & occ.o).is_empty());
        assert_eq!(occ.free | occ.x | occ.o, Mask::FULL);
    }

    #[test]
    fn test_coords_row_major() {
        let mask = Mask::EMPTY.with(at(2, 2)).with(at(1, 0)).with(at(0, 1));
        let coords: Vec<_> = mask.coords().collect();
        assert_eq!(coords, vec![at(1, 0), at(0, 1), at(2, 2)]);
        assert_eq!(coords.len(), mask.count());
    }

    #[test]
    fn test_write_coords_exact_buffer() {
        let mut out = [Coord::ORIGIN; 3];
        let written = WIN_LINES[ANTI_DIAGONAL].write_coords(&mut out);
        assert_eq!(written, 3);
        assert_eq!(out, [at(2, 0), at(1, 1), at(0, 2)]);
    }

    #[test]
    #[should_panic(expected = "coordinate buffer")]
    fn test_write_coords_undersized_buffer_panics() {
        let mut out = [Coord::ORIGIN; 2];
        WIN_LINES[0].write_coords(&mut out);
    }

    #[test]
    fn test_set_and_clear() {
        let mut mask = Mask::EMPTY;
        mask.set(at(1, 2), true);
        assert!(mask.contains(at(1, 2)));
        assert_eq!(mask.bits(), 1 << 7);
        mask.set(at(1, 2), false);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_winning_lines() {
        assert_eq!(Mask::EMPTY.winning_lines(), Mask::EMPTY);
        assert_eq!(WIN_LINES[4].winning_lines(), WIN_LINES[4]);

        let almost = Mask::from_bits(0o421 ^ 0o001);
        assert!(almost.winning_lines().is_empty());

        // Row 0 and column 0 together.
        let both = WIN_LINES[0] | WIN_LINES[3];
        assert_eq!(both.winning_lines(), both);
    }

    #[test]
    fn test_purity() {
        let mine = Mask::from_bits(0o003);
        assert!(mine.is_pure_against(Mask::EMPTY));
        assert!(!Mask::EMPTY.is_pure_against(mine));
        assert!(mine.is_pure_against(Mask::from_bits(0o001)));
    }

    #[test]
    fn test_lines_through() {
        let center: Vec<_> = lines_through(at(1, 1)).collect();
        assert_eq!(center, vec![1, 4, MAIN_DIAGONAL, ANTI_DIAGONAL]);

        let edge: Vec<_> = lines_through(at(1, 0)).collect();
        assert_eq!(edge, vec![0, 4]);

        let corner: Vec<_> = lines_through(at(2, 0)).collect();
        assert_eq!(corner, vec![0, 5, ANTI_DIAGONAL]);
    }
}
