//! Cursor navigation for automated players.
//!
//! Computer players walk the cursor one cell per round, the same way a
//! human does with the arrow keys.

use crate::types::{Coord, Direction};
use tracing::instrument;

/// Returns the single step that brings `from` closer to `to`, or `None`
/// once they coincide.
///
/// The axis with the larger distance goes first; ties move vertically.
/// Steps never leave the grid, so no wrap-around is involved.
#[instrument]
pub fn step_toward(from: Coord, to: Coord) -> Option<Direction> {
    let dx = to.x() as i32 - from.x() as i32;
    let dy = to.y() as i32 - from.y() as i32;

    if dx == 0 && dy == 0 {
        return None;
    }

    let step = if dx.abs() > dy.abs() {
        if dx < 0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if dy < 0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Some(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: usize, y: usize) -> Coord {
        Coord::new(x, y).unwrap()
    }

    #[test]
    fn test_arrived() {
        assert_eq!(step_toward(at(1, 1), at(1, 1)), None);
    }

    #[test]
    fn test_larger_axis_first() {
        assert_eq!(step_toward(at(0, 0), at(2, 1)), Some(Direction::Right));
        assert_eq!(step_toward(at(2, 0), at(1, 2)), Some(Direction::Down));
        assert_eq!(step_toward(at(2, 2), at(0, 2)), Some(Direction::Left));
        assert_eq!(step_toward(at(1, 2), at(1, 0)), Some(Direction::Up));
    }

    #[test]
    fn test_tie_moves_vertically() {
        assert_eq!(step_toward(at(0, 0), at(1, 1)), Some(Direction::Down));
        assert_eq!(step_toward(at(2, 2), at(0, 0)), Some(Direction::Up));
    }

    #[test]
    fn test_reaches_every_target_within_four_steps() {
        for from in Coord::ALL {
            for to in Coord::ALL {
                let mut cursor = from;
                let mut steps = 0;
                while let Some(direction) = step_toward(cursor, to) {
                    cursor = cursor.wrapping_step(direction);
                    steps += 1;
                    assert!(steps <= 4, "{} -> {} took more than 4 steps", from, to);
                }
                assert_eq!(cursor, to);
            }
        }
    }
}
