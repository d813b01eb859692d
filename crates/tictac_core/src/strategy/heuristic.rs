//! Blocking heuristic: take a win when one is on the board, otherwise block.
//!
//! It looks one move ahead only and never plans forks, so it can be beaten.

use super::candidates::Candidates;
use super::random::any_cell;
use super::{Strategy, StrategyKind};
use crate::bitboard::{Mask, WIN_LINES};
use crate::state::GameState;
use crate::types::Coord;
use rand::RngCore;
use tracing::{debug, instrument, trace};

/// Scores every win-line and picks from the most urgent bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

/// Where the scan of the eight lines ended up.
#[derive(Debug, Clone, Default)]
pub struct LineScan {
    /// Cell that completes one of my lines, if any.
    pub winning: Option<Coord>,
    /// Cells that complete one of the opponent's lines.
    pub danger: Candidates,
    /// Free cells on lines holding one opponent mark and none of mine.
    pub neutral: Candidates,
    /// Free cells on lines I already touch or the opponent ignores.
    pub useless: Candidates,
}

/// Two of `line` held and nothing of the opponent's on it.
fn one_short(held: Mask, other: Mask) -> bool {
    held.count() == 2 && held.is_pure_against(other)
}

/// A line I already sit on, or one the opponent has not touched, does not
/// need blocking.
fn potentially_useless(mine: Mask, theirs: Mask) -> bool {
    !theirs.is_pure_against(mine) || theirs.is_empty()
}

/// Sorts every line into the buckets from the point of view of the mark to move.
#[instrument(skip(state), fields(turn = %state.turn(), moves = state.moves()))]
pub fn scan_lines(state: &GameState) -> LineScan {
    let occupancy = state.occupancy();
    let me = state.turn();
    let all_mine = occupancy.of(me);
    let all_theirs = occupancy.of(me.opponent());
    let mut scan = LineScan::default();

    for (i, line) in WIN_LINES.iter().copied().enumerate() {
        let mine = all_mine & line;
        let theirs = all_theirs & line;
        let free = occupancy.free & line;

        if one_short(mine, theirs) {
            scan.winning = (line ^ mine).coords().next();
            trace!(line = i, "Winning line found");
            return scan;
        }

        if potentially_useless(mine, theirs) {
            scan.useless.extend(free);
        } else if one_short(theirs, mine) {
            scan.danger.extend(line ^ theirs);
            trace!(line = i, "Opponent one move from winning");
        } else {
            scan.neutral.extend(free);
        }
    }

    scan
}

impl Strategy for HeuristicStrategy {
    #[instrument(skip(self, state, rng), fields(turn = %state.turn(), moves = state.moves()))]
    fn choose(&mut self, state: &GameState, rng: &mut dyn RngCore) -> Option<Coord> {
        if state.moves() == 0 {
            let at = any_cell(rng);
            debug!(position = %at, "Opening move");
            return Some(at);
        }
        if state.occupancy().free.is_empty() {
            return None;
        }

        let scan = scan_lines(state);
        if let Some(at) = scan.winning {
            debug!(position = %at, "Completing a line");
            return Some(at);
        }

        let (bucket, reason) = if !scan.danger.is_empty() {
            (&scan.danger, "block")
        } else if !scan.neutral.is_empty() {
            (&scan.neutral, "neutral")
        } else {
            (&scan.useless, "fallback")
        };

        let picked = bucket
            .pick(rng)
            .or_else(|| super::RandomStrategy.choose(state, rng));
        debug!(position = ?picked, reason, "Cell chosen");
        picked
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Heuristic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Mark};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const E: Cell = Cell::Empty;
    const X: Cell = Cell::Occupied(Mark::X);
    const O: Cell = Cell::Occupied(Mark::O);

    fn at(x: usize, y: usize) -> Coord {
        Coord::new(x, y).unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        // X to move with row 0 = [X, X, _].
        let state = GameState::from_cells([[X, X, E], [O, O, E], [E, E, E]], Mark::X).unwrap();
        assert_eq!(state.turn(), Mark::X);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(HeuristicStrategy.choose(&state, &mut rng), Some(at(2, 0)));
        }
    }

    #[test]
    fn test_win_beats_block() {
        // Both marks are one short; O to move completes its own row.
        let state = GameState::from_cells([[O, O, E], [X, X, E], [X, E, E]], Mark::X).unwrap();
        assert_eq!(state.turn(), Mark::O);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(HeuristicStrategy.choose(&state, &mut rng), Some(at(2, 0)));
    }

    #[test]
    fn test_blocks_opponent() {
        // X to move, row 0 = [O, O, _], X has no line of its own.
        let state = GameState::from_cells([[O, O, E], [E, X, E], [E, E, E]], Mark::O).unwrap();
        assert_eq!(state.turn(), Mark::X);
        let scan = scan_lines(&state);
        assert_eq!(scan.winning, None);
        assert_eq!(scan.danger.as_slice(), &[at(2, 0)]);

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..10 {
            assert_eq!(HeuristicStrategy.choose(&state, &mut rng), Some(at(2, 0)));
        }
    }

    #[test]
    fn test_neutral_bucket_prefers_opponent_lines() {
        // O to move; X holds only the centre, so every line through it is neutral.
        let state = GameState::from_cells([[E, E, E], [E, X, E], [E, E, E]], Mark::X).unwrap();
        let scan = scan_lines(&state);
        assert!(scan.danger.is_empty());
        assert_eq!(scan.neutral.len(), 8);
        assert!(!scan.neutral.members().contains(at(1, 1)));
    }

    #[test]
    fn test_buckets_hold_only_free_cells() {
        let state = GameState::from_cells([[X, O, E], [E, X, E], [O, E, E]], Mark::O).unwrap();
        assert_eq!(state.turn(), Mark::O);
        let free = state.occupancy().free;
        let scan = scan_lines(&state);
        assert_eq!(scan.danger.as_slice(), &[at(2, 2)]);
        for bucket in [&scan.danger, &scan.neutral, &scan.useless] {
            assert!(free.contains_all(bucket.members()));
        }
    }

    #[test]
    fn test_opening_move_is_any_cell() {
        let state = GameState::new(Mark::O);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let at = HeuristicStrategy.choose(&state, &mut rng).unwrap();
        assert!(state.board().is_empty(at));
    }
}
