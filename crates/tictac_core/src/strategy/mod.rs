//! Decision strategies for computer players.

mod candidates;
mod heuristic;
mod random;

pub use candidates::Candidates;
pub use heuristic::{HeuristicStrategy, LineScan, scan_lines};
pub use random::RandomStrategy;

use crate::state::GameState;
use crate::types::Coord;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// A policy that picks the next cell to play.
pub trait Strategy: Send + std::fmt::Debug {
    /// Chooses a free cell on `state`'s board for the mark to move.
    ///
    /// Returns `None` only when the board has no free cell.
    fn choose(&mut self, state: &GameState, rng: &mut dyn RngCore) -> Option<Coord>;

    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;
}

/// The available strategies.
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
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Plays any free cell.
    Random,
    /// Wins when it can, blocks when it must.
    #[default]
    Heuristic,
}

impl StrategyKind {
    /// Creates a fresh instance of this strategy.
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy),
            StrategyKind::Heuristic => Box::new(HeuristicStrategy),
        }
    }

    /// Returns the menu label.
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Random => "Random (easy)",
            StrategyKind::Heuristic => "Blocking heuristic (medium)",
        }
    }
}
