//! Turn engine and match loop.

use crate::error::{EngineError, EngineErrorKind};
use crate::input::{GameInput, InputSource, Renderer};
use crate::state::GameState;
use crate::types::{Coord, GameStatus, Mark};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// What the caller should do after an input was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep playing.
    Continue,
    /// The seat asked to leave the match.
    Quit,
}

/// Effect of a placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The mark was written and the turn passed.
    Placed,
    /// The cell was taken; nothing changed.
    Occupied,
}

/// Owns the [`GameState`] and is the only thing that mutates it.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a game opened by `starter`.
    #[instrument]
    pub fn new(starter: Mark) -> Self {
        Self {
            state: GameState::new(starter),
        }
    }

    /// Creates a game whose opener is drawn uniformly at random.
    #[instrument(skip(rng))]
    pub fn with_random_starter(rng: &mut dyn RngCore) -> Self {
        let starter = if rng.gen_bool(0.5) { Mark::X } else { Mark::O };
        info!(%starter, "Starter drawn");
        Self::new(starter)
    }

    /// Resumes from an existing state.
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// Returns the current snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Applies one input.
    ///
    /// # Errors
    ///
    /// Any input other than [`GameInput::Quit`] on a finished game is refused
    /// with [`EngineErrorKind::GameOver`] and leaves the state untouched.
    #[instrument(skip(self), fields(turn = %self.state.turn(), cursor = %self.state.cursor()))]
    pub fn apply(&mut self, input: GameInput) -> Result<Control, EngineError> {
        match input {
            GameInput::Quit => {
                debug!("Quit requested");
                Ok(Control::Quit)
            }
            GameInput::Move(direction) => {
                self.ensure_running()?;
                let cursor = self.state.cursor().wrapping_step(direction);
                self.state.set_cursor(cursor);
                Ok(Control::Continue)
            }
            GameInput::Place => {
                self.place(self.state.cursor())?;
                Ok(Control::Continue)
            }
        }
    }

    /// Places the current mark at `at` and evaluates the outcome.
    ///
    /// Placing on an occupied cell is a no-op.
    ///
    /// # Errors
    ///
    /// Refuses with [`EngineErrorKind::GameOver`] once the match has ended.
    #[instrument(skip(self), fields(position = %at, mark = %self.state.turn()))]
    pub fn place(&mut self, at: Coord) -> Result<Placement, EngineError> {
        self.ensure_running()?;

        if !self.state.board().is_empty(at) {
            debug!("Cell occupied, ignoring");
            return Ok(Placement::Occupied);
        }

        self.state.place_mark(at);
        self.state.refresh_status();
        debug!(
            moves = self.state.moves(),
            status = %self.state.status(),
            "Mark placed"
        );
        Ok(Placement::Placed)
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        match self.state.status() {
            GameStatus::Running => Ok(()),
            status => Err(EngineError::new(EngineErrorKind::GameOver(status))),
        }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Played to a terminal status.
    Finished(GameStatus),
    /// A seat quit first.
    Cancelled,
}

/// One match between two seats.
pub struct Match {
    game: Game,
    seat_x: Box<dyn InputSource>,
    seat_o: Box<dyn InputSource>,
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("game", &self.game)
            .field("seat_x", &self.seat_x.name())
            .field("seat_o", &self.seat_o.name())
            .finish()
    }
}

impl Match {
    /// Creates a match for `game` with one input source per mark.
    pub fn new(game: Game, seat_x: Box<dyn InputSource>, seat_o: Box<dyn InputSource>) -> Self {
        Self {
            game,
            seat_x,
            seat_o,
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the name of the seat playing `mark`.
    pub fn seat_name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => self.seat_x.name(),
            Mark::O => self.seat_o.name(),
        }
    }

    /// Plays one round: asks the seat to move and applies its input.
    #[instrument(skip(self), fields(turn = %self.game.state().turn()))]
    pub fn play_round(&mut self) -> Result<Control, EngineError> {
        let state = self.game.state();
        let seat = match state.turn() {
            Mark::X => &mut self.seat_x,
            Mark::O => &mut self.seat_o,
        };
        let input = seat.next_input(state)?;
        self.game.apply(input)
    }

    /// Runs rounds until the match finishes or a seat quits.
    ///
    /// `renderer` sees the state before every round and once more at the end,
    /// followed by [`Renderer::finish`] when the board decided the match.
    #[instrument(skip_all, fields(x = %self.seat_x.name(), o = %self.seat_o.name()))]
    pub fn run(&mut self, renderer: &mut dyn Renderer) -> Result<MatchResult, EngineError> {
        info!(starter = %self.game.state().starter(), "Match started");
        loop {
            renderer.render(self.game.state())?;

            let status = self.game.state().status();
            if status.is_over() {
                info!(%status, moves = self.game.state().moves(), "Match finished");
                renderer.finish(self.game.state())?;
                return Ok(MatchResult::Finished(status));
            }

            if self.play_round()? == Control::Quit {
                info!("Match cancelled");
                return Ok(MatchResult::Cancelled);
            }
        }
    }
}
