//! Tests for the key bindings.

use crossterm::event::KeyCode;
use tictac::map_key;
use tictac_core::{Direction, GameInput};

#[test]
fn test_movement_keys() {
    for (keys, direction) in [
        ([KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], Direction::Up),
        ([KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], Direction::Down),
        ([KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], Direction::Left),
        ([KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], Direction::Right),
    ] {
        for key in keys {
            assert_eq!(map_key(key), Some(GameInput::Move(direction)), "{key:?}");
        }
    }
}

#[test]
fn test_place_and_quit_keys() {
    assert_eq!(map_key(KeyCode::Enter), Some(GameInput::Place));
    assert_eq!(map_key(KeyCode::Char(' ')), Some(GameInput::Place));
    for key in [
        KeyCode::Esc,
        KeyCode::Backspace,
        KeyCode::Char('q'),
        KeyCode::Char('Q'),
    ] {
        assert_eq!(map_key(key), Some(GameInput::Quit));
    }
}
