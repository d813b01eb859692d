//! Fixed-capacity, deduplicating bucket of candidate cells.

use crate::bitboard::Mask;
use crate::types::Coord;
use rand::RngCore;
use rand::seq::SliceRandom;

/// Up to nine distinct cells in insertion order.
///
/// Membership is tracked with its own [`Mask`], so pushing a cell that is
/// already present does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    cells: [Coord; 9],
    len: usize,
    members: Mask,
}

impl Candidates {
    /// Creates an empty bucket.
    pub fn new() -> Self {
        Self {
            cells: [Coord::ORIGIN; 9],
            len: 0,
            members: Mask::EMPTY,
        }
    }

    /// Adds `at` unless it is already present.
    pub fn push(&mut self, at: Coord) {
        if self.members.contains(at) {
            return;
        }
        self.members.set(at, true);
        self.cells[self.len] = at;
        self.len += 1;
    }

    /// Adds every cell of `mask`.
    pub fn extend(&mut self, mask: Mask) {
        for at in mask.coords() {
            self.push(at);
        }
    }

    /// Number of distinct cells held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the bucket holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cells in insertion order.
    pub fn as_slice(&self) -> &[Coord] {
        &self.cells[..self.len]
    }

    /// Membership mask.
    pub fn members(&self) -> Mask {
        self.members
    }

    /// Picks one cell uniformly at random.
    pub fn pick(&self, rng: &mut dyn RngCore) -> Option<Coord> {
        self.as_slice().choose(rng).copied()
    }
}

impl Default for Candidates {
    fn default() -> Self {
        Self::new()
    }
}
