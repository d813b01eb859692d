//! Screen trait and transition type for the menu state machine.

use crossterm::event::KeyCode;
use ratatui::Frame;
use tictac_core::{Mark, StrategyKind};

use crate::lineup::Lineup;

/// Which machine seat a strategy menu is filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyPrompt {
    /// Player vs Machine: the human already took `human`.
    Opponent {
        /// Mark played from the keyboard.
        human: Mark,
    },
    /// Machine vs Machine, first seat.
    MachineX,
    /// Machine vs Machine, second seat.
    MachineO {
        /// Strategy already chosen for X.
        x: StrategyKind,
    },
}

/// The result of handling a key on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Back to the main menu.
    GoToMainMenu,
    /// Ask the two players to agree on marks.
    GoToPvpConfirm,
    /// Let the human pick a mark.
    GoToMarkSelect,
    /// Pick a strategy for one machine seat.
    GoToStrategySelect(StrategyPrompt),
    /// Play a match with these seats.
    StartMatch(Lineup),
    /// Leave the program.
    Quit,
}

/// Implemented by each menu screen.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Handles a key press and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, code: KeyCode) -> ScreenTransition;
}
