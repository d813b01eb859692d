//! Input sources and render sinks plugged into a match.

use crate::error::EngineError;
use crate::state::GameState;
use crate::types::Direction;
use serde::{Deserialize, Serialize};

/// One action requested by whoever is playing the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameInput {
    /// Abandon the match.
    Quit,
    /// Move the cursor one cell.
    Move(Direction),
    /// Place the current mark under the cursor.
    Place,
}

/// Something that can play a turn: a keyboard, a strategy agent, a script.
///
/// Implementations block until they have an input. The match loop does not
/// care which kind is behind a seat.
pub trait InputSource {
    /// Returns the next input for the mark to move in `state`.
    fn next_input(&mut self, state: &GameState) -> Result<GameInput, EngineError>;

    /// Returns the seat's display name.
    fn name(&self) -> &str;
}

/// Receives a consistent snapshot once per round.
pub trait Renderer {
    /// Draws `state`.
    fn render(&mut self, state: &GameState) -> Result<(), EngineError>;

    /// Called once with the final state after a match ends on the board.
    ///
    /// Renderers that animate the result do it here. Not called when a
    /// seat quits.
    fn finish(&mut self, _state: &GameState) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Renderer that draws nothing, for headless play.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Replays a fixed list of inputs, then quits.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    name: String,
    inputs: std::collections::VecDeque<GameInput>,
}

impl ScriptedInput {
    /// Creates a source that yields `inputs` in order.
    pub fn new(name: impl Into<String>, inputs: impl IntoIterator<Item = GameInput>) -> Self {
        Self {
            name: name.into(),
            inputs: inputs.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self, _state: &GameState) -> Result<GameInput, EngineError> {
        Ok(self.inputs.pop_front().unwrap_or(GameInput::Quit))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
