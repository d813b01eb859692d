//! Computer player that walks the cursor like a human would.

use crate::error::{EngineError, EngineErrorKind};
use crate::input::{GameInput, InputSource};
use crate::navigator::step_toward;
use crate::state::GameState;
use crate::strategy::{Strategy, StrategyKind};
use crate::types::Coord;
use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Cosmetic delays, in milliseconds.
///
/// The first five pace computer players, each delay being
/// `base + uniform(0..jitter)`. The last two pace the end-of-game
/// animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Pause before deciding on a target.
    think_ms: u64,
    /// Extra random pause before deciding.
    think_jitter_ms: u64,
    /// Pause before placing once on target.
    confirm_ms: u64,
    /// Pause before each cursor step.
    step_ms: u64,
    /// Extra random pause per step.
    step_jitter_ms: u64,
    /// Pause between winning cells lighting up.
    reveal_ms: u64,
    /// Pause between free cells filling on a draw.
    fill_ms: u64,
}

impl Pacing {
    /// No delays at all.
    pub fn instant() -> Self {
        Self {
            think_ms: 0,
            think_jitter_ms: 0,
            confirm_ms: 0,
            step_ms: 0,
            step_jitter_ms: 0,
            reveal_ms: 0,
            fill_ms: 0,
        }
    }

    /// Checks whether every delay is zero.
    pub fn is_instant(&self) -> bool {
        *self == Self::instant()
    }

    fn pause(base: u64, jitter: u64, rng: &mut StdRng) {
        let extra = if jitter > 0 { rng.gen_range(0..jitter) } else { 0 };
        let total = base + extra;
        if total > 0 {
            std::thread::sleep(Duration::from_millis(total));
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            think_ms: 300,
            think_jitter_ms: 300,
            confirm_ms: 225,
            step_ms: 100,
            step_jitter_ms: 50,
            reveal_ms: 50,
            fill_ms: 250,
        }
    }
}

/// An [`InputSource`] driven by a [`Strategy`].
///
/// The agent keeps a private goal. With no goal it asks its strategy for one;
/// while the cursor is elsewhere it emits one navigation step per round; on
/// arrival it places and forgets the goal.
#[derive(Debug)]
pub struct StrategyAgent {
    name: String,
    strategy: Box<dyn Strategy>,
    goal: Option<Coord>,
    pacing: Pacing,
    rng: StdRng,
}

impl StrategyAgent {
    /// Creates an agent seeded from the operating system.
    #[instrument(skip(name), fields(name = %name.as_ref()))]
    pub fn new(name: impl AsRef<str>, kind: StrategyKind, pacing: Pacing) -> Self {
        Self::with_rng(name, kind, pacing, StdRng::from_entropy())
    }

    /// Creates an agent with a reproducible random stream.
    pub fn seeded(name: impl AsRef<str>, kind: StrategyKind, pacing: Pacing, seed: u64) -> Self {
        Self::with_rng(name, kind, pacing, StdRng::seed_from_u64(seed))
    }

    fn with_rng(name: impl AsRef<str>, kind: StrategyKind, pacing: Pacing, rng: StdRng) -> Self {
        Self {
            name: name.as_ref().to_string(),
            strategy: kind.build(),
            goal: None,
            pacing,
            rng,
        }
    }

    /// Returns the current goal, `None` while undecided.
    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    /// Returns the strategy in use.
    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }
}

impl InputSource for StrategyAgent {
    #[instrument(skip(self, state), fields(agent = %self.name, cursor = %state.cursor()))]
    fn next_input(&mut self, state: &GameState) -> Result<GameInput, EngineError> {
        let goal = match self.goal {
            Some(goal) => goal,
            None => {
                Pacing::pause(self.pacing.think_ms, self.pacing.think_jitter_ms, &mut self.rng);
                let goal = self
                    .strategy
                    .choose(state, &mut self.rng)
                    .ok_or_else(|| EngineError::new(EngineErrorKind::NoFreeCell))?;
                debug!(goal = %goal, "Goal decided");
                self.goal = Some(goal);
                goal
            }
        };

        match step_toward(state.cursor(), goal) {
            None => {
                Pacing::pause(self.pacing.confirm_ms, 0, &mut self.rng);
                self.goal = None;
                Ok(GameInput::Place)
            }
            Some(direction) => {
                Pacing::pause(self.pacing.step_ms, self.pacing.step_jitter_ms, &mut self.rng);
                Ok(GameInput::Move(direction))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
