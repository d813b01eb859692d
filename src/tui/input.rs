//! Keyboard handling.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tictac_core::{Direction, EngineError, GameInput, GameState, InputSource};
use tracing::{debug, instrument};

/// Maps a key to a game input.
///
/// WASD and the arrows move, Space and Enter place, Q, Esc and Backspace quit.
pub fn map_key(code: KeyCode) -> Option<GameInput> {
    let input = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => GameInput::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => GameInput::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => GameInput::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Move(Direction::Right)
        }
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Place,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') | KeyCode::Char('Q') => {
            GameInput::Quit
        }
        _ => return None,
    };
    Some(input)
}

/// Blocks until a mapped key is pressed.
///
/// Key releases and repeats are skipped.
pub fn read_input() -> std::io::Result<GameInput> {
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(input) = map_key(key.code)
        {
            return Ok(input);
        }
    }
}

/// Waits for a confirm or cancel key after a match.
///
/// Returns `true` on confirm.
#[instrument]
pub fn wait_for_dismiss() -> std::io::Result<bool> {
    loop {
        match read_input()? {
            GameInput::Place => return Ok(true),
            GameInput::Quit => return Ok(false),
            GameInput::Move(_) => continue,
        }
    }
}

/// A seat played from the keyboard.
#[derive(Debug, Clone)]
pub struct KeyboardInput {
    name: String,
}

impl KeyboardInput {
    /// Creates a keyboard seat with a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl InputSource for KeyboardInput {
    #[instrument(skip(self, state), fields(seat = %self.name, turn = %state.turn()))]
    fn next_input(&mut self, state: &GameState) -> Result<GameInput, EngineError> {
        let input = read_input().map_err(|e| EngineError::input(e.to_string()))?;
        debug!(%input, "Key read");
        Ok(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Tab), None);
        assert_eq!(map_key(KeyCode::F(1)), None);
    }
}
