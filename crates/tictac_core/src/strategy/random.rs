//! Uniformly random play.

use super::{Strategy, StrategyKind};
use crate::state::GameState;
use crate::types::Coord;
use rand::{Rng, RngCore};
use tracing::{debug, instrument};

/// Samples cells uniformly until it hits a free one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

/// Uniformly random cell on the grid, free or not.
pub(crate) fn any_cell(rng: &mut dyn RngCore) -> Coord {
    let index = rng.gen_range(0..Coord::ALL.len());
    Coord::ALL[index]
}

impl Strategy for RandomStrategy {
    #[instrument(skip(self, state, rng), fields(moves = state.moves()))]
    fn choose(&mut self, state: &GameState, rng: &mut dyn RngCore) -> Option<Coord> {
        if state.occupancy().free.is_empty() {
            return None;
        }
        loop {
            let at = any_cell(rng);
            if state.board().is_empty(at) {
                debug!(position = %at, "Random cell chosen");
                return Some(at);
            }
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }
}
