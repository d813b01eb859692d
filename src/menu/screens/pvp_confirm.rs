//! Player vs Player: both players agree on who plays which mark.

use crossterm::event::KeyCode;
use ratatui::Frame;
use tracing::instrument;

use super::{ListAction, OptionList};
use crate::lineup::{Lineup, Seat};
use crate::menu::screen::{Screen, ScreenTransition};

/// Confirmation shown before a two-player match.
#[derive(Debug)]
pub struct PvpConfirmScreen {
    list: OptionList<bool>,
}

impl PvpConfirmScreen {
    /// Creates the confirmation with "ready" selected.
    #[instrument]
    pub fn new() -> Self {
        Self {
            list: OptionList::new(
                "Decide who is X and who is O",
                vec![
                    (true, "We're ready, start".to_string()),
                    (false, "Back".to_string()),
                ],
            ),
        }
    }
}

impl Default for PvpConfirmScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for PvpConfirmScreen {
    fn render(&self, frame: &mut Frame) {
        self.list.render(
            frame,
            "Player vs Player",
            "Enter/Space: confirm | Q/Esc: back",
        );
    }

    #[instrument(skip(self))]
    fn handle_key(&mut self, code: KeyCode) -> ScreenTransition {
        match self.list.handle_key(code) {
            ListAction::None => ScreenTransition::Stay,
            ListAction::Chosen(true) => {
                ScreenTransition::StartMatch(Lineup::new(Seat::Human, Seat::Human))
            }
            ListAction::Chosen(false) | ListAction::Cancelled => ScreenTransition::GoToMainMenu,
        }
    }
}
