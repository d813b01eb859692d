//! Headless strategy-versus-strategy runs.

use crate::agent::{Pacing, StrategyAgent};
use crate::engine::{Game, Match, MatchResult};
use crate::error::EngineError;
use crate::input::NullRenderer;
use crate::strategy::StrategyKind;
use crate::types::{GameStatus, Mark};
use derive_getters::Getters;
use derive_new::new;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A batch of computer-only matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new, Serialize, Deserialize)]
pub struct Simulation {
    /// Strategy seated on X.
    pub x: StrategyKind,
    /// Strategy seated on O.
    pub o: StrategyKind,
    /// Number of matches to play.
    pub games: u32,
    /// Master seed; every match derives its own seeds from it.
    pub seed: u64,
}

/// Tally of a [`Simulation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SimulationReport {
    x: StrategyKind,
    o: StrategyKind,
    games: u32,
    seed: u64,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
    x_started: u32,
    o_started: u32,
}

impl SimulationReport {
    fn record(&mut self, starter: Mark, status: GameStatus) {
        match starter {
            Mark::X => self.x_started += 1,
            Mark::O => self.o_started += 1,
        }
        match status {
            GameStatus::Won(Mark::X) => self.x_wins += 1,
            GameStatus::Won(Mark::O) => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::Running => {}
        }
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} games, X = {}, O = {}, seed {}",
            self.games, self.x, self.o, self.seed
        )?;
        writeln!(f, "  X wins: {}", self.x_wins)?;
        writeln!(f, "  O wins: {}", self.o_wins)?;
        writeln!(f, "  draws:  {}", self.draws)?;
        write!(
            f,
            "  started by X: {}, by O: {}",
            self.x_started, self.o_started
        )
    }
}

impl Simulation {
    /// Plays every match with zero pacing and returns the tally.
    ///
    /// # Errors
    ///
    /// Fails if a match is cancelled or a seat errors, which computer seats
    /// only do on a full board.
    #[instrument(fields(x = %self.x, o = %self.o, games = self.games, seed = self.seed))]
    pub fn run(&self) -> Result<SimulationReport, EngineError> {
        let mut master = StdRng::seed_from_u64(self.seed);
        let mut report = SimulationReport {
            x: self.x,
            o: self.o,
            games: self.games,
            seed: self.seed,
            ..SimulationReport::default()
        };

        for round in 0..self.games {
            let game = Game::with_random_starter(&mut master);
            let starter = game.state().starter();
            let seat_x = StrategyAgent::seeded("X", self.x, Pacing::instant(), master.r#gen());
            let seat_o = StrategyAgent::seeded("O", self.o, Pacing::instant(), master.r#gen());

            let mut game_match = Match::new(game, Box::new(seat_x), Box::new(seat_o));
            match game_match.run(&mut NullRenderer)? {
                MatchResult::Finished(status) => {
                    debug!(round, %starter, %status, "Simulated match finished");
                    report.record(starter, status);
                }
                MatchResult::Cancelled => {
                    return Err(EngineError::input("computer seat quit a simulated match"));
                }
            }
        }

        info!(
            x_wins = report.x_wins,
            o_wins = report.o_wins,
            draws = report.draws,
            "Simulation complete"
        );
        Ok(report)
    }
}

/// Plays `games` matches between `x` and `o`.
pub fn simulate(
    x: StrategyKind,
    o: StrategyKind,
    games: u32,
    seed: u64,
) -> Result<SimulationReport, EngineError> {
    Simulation::new(x, o, games, seed).run()
}
