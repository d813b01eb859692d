//! Frames for the end-of-game animations.
//!
//! Frames carry their own board copy, so the marks a draw animation fills
//! in never reach the [`GameState`] they were built from.

use crate::agent::Pacing;
use crate::bitboard::Mask;
use crate::state::GameState;
use crate::types::{Board, Cell, Coord, GameStatus};
use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// What an animation frame emphasises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTone {
    /// Cells of the winning lines.
    Win,
    /// A cell the draw animation just filled.
    Fill,
}

/// One picture of an animation, shown for `hold_ms` before the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Board to draw.
    pub board: Board,
    /// Cells to emphasise.
    pub highlight: Mask,
    /// How the highlight should look.
    pub tone: FrameTone,
    /// Pause after drawing, in milliseconds.
    pub hold_ms: u64,
}

/// Builds the animation for a finished match, or nothing while it runs.
///
/// A win reveals the winning cells one at a time. A draw fills the free
/// cells in random order with alternating marks, starting with the mark
/// to move.
#[instrument(skip(state, pacing, rng), fields(status = %state.status()))]
pub fn end_animation(
    state: &GameState,
    pacing: &Pacing,
    rng: &mut dyn RngCore,
) -> Vec<AnimationFrame> {
    let frames = match state.status() {
        GameStatus::Running => Vec::new(),
        GameStatus::Won(_) => win_frames(state, *pacing.reveal_ms()),
        GameStatus::Draw => fill_frames(state, *pacing.fill_ms(), rng),
    };
    debug!(frames = frames.len(), "Animation built");
    frames
}

/// Reveals `state.highlight()` cell by cell in row-major order.
///
/// The first frame shows no highlight and the last shows all of it.
/// Returns nothing when `reveal_ms` is zero.
pub fn win_frames(state: &GameState, reveal_ms: u64) -> Vec<AnimationFrame> {
    if reveal_ms == 0 {
        return Vec::new();
    }
    let mut shown = Mask::EMPTY;
    let mut frames = vec![AnimationFrame {
        board: state.board().clone(),
        highlight: shown,
        tone: FrameTone::Win,
        hold_ms: reveal_ms,
    }];
    for at in state.highlight().coords() {
        shown = shown.with(at);
        frames.push(AnimationFrame {
            board: state.board().clone(),
            highlight: shown,
            tone: FrameTone::Win,
            hold_ms: reveal_ms,
        });
    }
    frames
}

/// Fills every free cell of a drawn board, one frame per cell.
///
/// The first frame is the board as played. Each later frame adds one mark
/// and highlights it. Returns nothing when `fill_ms` is zero.
pub fn fill_frames(state: &GameState, fill_ms: u64, rng: &mut dyn RngCore) -> Vec<AnimationFrame> {
    if fill_ms == 0 {
        return Vec::new();
    }
    let mut free: Vec<Coord> = state.occupancy().free.coords().collect();
    free.shuffle(rng);

    let mut board = state.board().clone();
    let mut frames = vec![AnimationFrame {
        board: board.clone(),
        highlight: Mask::EMPTY,
        tone: FrameTone::Fill,
        hold_ms: fill_ms,
    }];
    let mut mark = state.turn();
    for at in free {
        board.set(at, Cell::Occupied(mark));
        mark = mark.opponent();
        frames.push(AnimationFrame {
            board: board.clone(),
            highlight: Mask::single(at),
            tone: FrameTone::Fill,
            hold_ms: fill_ms,
        });
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const E: Cell = Cell::Empty;
    const X: Cell = Cell::Occupied(Mark::X);
    const O: Cell = Cell::Occupied(Mark::O);

    #[test]
    fn test_win_reveals_one_cell_per_frame() {
        let state = GameState::from_cells([[X, X, X], [O, O, E], [E, E, E]], Mark::X).unwrap();
        let frames = win_frames(&state, 50);
        assert_eq!(frames.len(), 4);
        for (shown, frame) in frames.iter().enumerate() {
            assert_eq!(frame.highlight.count(), shown);
            assert_eq!(&frame.board, state.board());
            assert_eq!(frame.hold_ms, 50);
        }
        assert_eq!(frames[1].highlight, Mask::single(Coord::ORIGIN));
        assert_eq!(frames[3].highlight, state.highlight());
    }

    #[test]
    fn test_fill_alternates_from_mark_to_move() {
        let state = GameState::from_cells([[X, O, X], [X, O, E], [O, X, E]], Mark::X).unwrap();
        assert_eq!(state.status(), GameStatus::Draw);
        assert_eq!(state.turn(), Mark::O);
        let before = state.clone();

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let frames = fill_frames(&state, 250, &mut rng);
        assert_eq!(frames.len(), 3);
        assert_eq!(&frames[0].board, state.board());
        assert!(frames[0].highlight.is_empty());

        let first = frames[1].highlight.coords().next().unwrap();
        let second = frames[2].highlight.coords().next().unwrap();
        assert_ne!(first, second);
        assert_eq!(frames[1].board.get(first), O);
        assert_eq!(frames[2].board.get(second), X);
        assert!(Coord::ALL.iter().all(|at| !frames[2].board.is_empty(*at)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_fill_order_varies_with_rng() {
        let state = GameState::from_cells([[X, O, X], [E, O, E], [O, X, E]], Mark::X).unwrap();
        let orders: std::collections::HashSet<Vec<Coord>> = (0..16)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                fill_frames(&state, 1, &mut rng)
                    .iter()
                    .skip(1)
                    .filter_map(|frame| frame.highlight.coords().next())
                    .collect()
            })
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn test_zero_delay_skips_animation() {
        let state = GameState::from_cells([[X, X, X], [O, O, E], [E, E, E]], Mark::X).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(end_animation(&state, &Pacing::instant(), &mut rng).is_empty());
        assert!(!end_animation(&state, &Pacing::default(), &mut rng).is_empty());
        assert!(end_animation(&GameState::new(Mark::X), &Pacing::default(), &mut rng).is_empty());
    }
}
