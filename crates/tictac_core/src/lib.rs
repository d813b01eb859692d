//! Tic-tac-toe engine with a bitmask board encoding.
//!
//! # Architecture
//!
//! - **Bitboard**: the grid as three disjoint 9-bit occupancy masks
//! - **Outcome**: win and forced-draw detection over those masks
//! - **Navigator**: one cursor step toward a target cell
//! - **Strategies**: random and blocking-heuristic computer players
//! - **Engine**: applies one input per round and runs a match between two seats
//! - **Animation**: frames that reveal a win or fill a drawn board
//!
//! # Example
//!
//! ```
//! use tictac_core::{simulate, StrategyKind};
//!
//! let report = simulate(StrategyKind::Heuristic, StrategyKind::Random, 10, 42)?;
//! assert_eq!(report.x_wins() + report.o_wins() + report.draws(), 10);
//! # Ok::<(), tictac_core::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod agent;
mod animation;
mod bitboard;
mod engine;
mod error;
mod input;
mod navigator;
mod outcome;
mod simulate;
mod state;
mod strategy;
mod types;

// Crate-level exports - Board model
pub use types::{Board, Cell, Coord, Direction, GameStatus, Mark};

// Crate-level exports - Bit masks
pub use bitboard::{ANTI_DIAGONAL, MAIN_DIAGONAL, Mask, Occupancy, WIN_LINES, lines_through};

// Crate-level exports - Outcome detection
pub use outcome::{FIRST_POSSIBLE_DRAW, FIRST_POSSIBLE_WIN, detect, min_moves, winner};

// Crate-level exports - Game state
pub use state::GameState;

// Crate-level exports - Errors
pub use error::{EngineError, EngineErrorKind, PositionError};

// Crate-level exports - Navigation
pub use navigator::step_toward;

// Crate-level exports - Strategies
pub use strategy::{
    Candidates, HeuristicStrategy, LineScan, RandomStrategy, Strategy, StrategyKind, scan_lines,
};

// Crate-level exports - Seats and rendering
pub use agent::{Pacing, StrategyAgent};
pub use input::{GameInput, InputSource, NullRenderer, Renderer, ScriptedInput};

// Crate-level exports - Turn engine
pub use engine::{Control, Game, Match, MatchResult, Placement};

// Crate-level exports - End-of-game animation
pub use animation::{AnimationFrame, FrameTone, end_animation, fill_frames, win_frames};

// Crate-level exports - Simulation
pub use simulate::{Simulation, SimulationReport, simulate};
