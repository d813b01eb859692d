//! Who sits on which mark.

use serde::{Deserialize, Serialize};
use tictac_core::{InputSource, Mark, Pacing, StrategyAgent, StrategyKind};
use tracing::instrument;

use crate::tui::KeyboardInput;

/// The three ways to set up a match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    clap::ValueEnum,
    strum::Display,
    strum::EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Two people share the keyboard.
    #[strum(to_string = "Player vs Player")]
    Pvp,
    /// One person against a computer player.
    #[strum(to_string = "Player vs Machine")]
    Pvm,
    /// Two computer players.
    #[strum(to_string = "Machine vs Machine")]
    Mvm,
}

/// Whoever plays one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    /// Keyboard input.
    Human,
    /// A computer player using the given strategy.
    Machine(StrategyKind),
}

impl Seat {
    /// Returns a short label such as `Human` or `Machine (heuristic)`.
    pub fn label(self) -> String {
        match self {
            Seat::Human => "Human".to_string(),
            Seat::Machine(kind) => format!("Machine ({})", kind),
        }
    }

    /// Creates the input source that plays this seat.
    #[instrument]
    pub fn input_source(self, mark: Mark, pacing: Pacing, seed: u64) -> Box<dyn InputSource> {
        let name = format!("{} ({})", self.label(), mark);
        match self {
            Seat::Human => Box::new(KeyboardInput::new(name)),
            Seat::Machine(kind) => Box::new(StrategyAgent::seeded(name, kind, pacing, seed)),
        }
    }
}

/// Seat assignment for both marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    /// Seat playing X.
    pub x: Seat,
    /// Seat playing O.
    pub o: Seat,
}

impl Lineup {
    /// Creates a lineup from explicit seats.
    pub fn new(x: Seat, o: Seat) -> Self {
        Self { x, o }
    }

    /// Builds the lineup selected on the command line.
    ///
    /// `human` picks the keyboard mark in [`MatchMode::Pvm`]; `x` and `o`
    /// pick machine strategies and default to the heuristic.
    #[instrument]
    pub fn from_mode(
        mode: MatchMode,
        human: Mark,
        x: Option<StrategyKind>,
        o: Option<StrategyKind>,
    ) -> Self {
        let x_machine = Seat::Machine(x.unwrap_or_default());
        let o_machine = Seat::Machine(o.unwrap_or_default());
        match mode {
            MatchMode::Pvp => Self::new(Seat::Human, Seat::Human),
            MatchMode::Mvm => Self::new(x_machine, o_machine),
            MatchMode::Pvm => match human {
                Mark::X => Self::new(Seat::Human, o_machine),
                Mark::O => Self::new(x_machine, Seat::Human),
            },
        }
    }

    /// Returns the seat playing `mark`.
    pub fn seat(&self, mark: Mark) -> Seat {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Whether any seat reads the keyboard.
    pub fn has_human(&self) -> bool {
        self.x == Seat::Human || self.o == Seat::Human
    }
}
