//! Player vs Machine: the human picks a mark.

use crossterm::event::KeyCode;
use ratatui::Frame;
use strum::IntoEnumIterator;
use tictac_core::Mark;
use tracing::{info, instrument};

use super::{ListAction, OptionList};
use crate::menu::screen::{Screen, ScreenTransition, StrategyPrompt};

/// Mark selection for the human seat.
#[derive(Debug)]
pub struct MarkSelectScreen {
    list: OptionList<Mark>,
}

impl MarkSelectScreen {
    /// Creates the mark menu with X selected.
    #[instrument]
    pub fn new() -> Self {
        let options = Mark::iter()
            .map(|mark| (mark, format!("Play as {}", mark)))
            .collect();
        Self {
            list: OptionList::new("Choose your mark", options),
        }
    }
}

impl Default for MarkSelectScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MarkSelectScreen {
    fn render(&self, frame: &mut Frame) {
        self.list.render(
            frame,
            "Player vs Machine",
            "↑↓/WS: navigate | Enter/Space: select | Q/Esc: back",
        );
    }

    #[instrument(skip(self))]
    fn handle_key(&mut self, code: KeyCode) -> ScreenTransition {
        match self.list.handle_key(code) {
            ListAction::None => ScreenTransition::Stay,
            ListAction::Cancelled => ScreenTransition::GoToMainMenu,
            ListAction::Chosen(human) => {
                info!(%human, "Human mark chosen");
                ScreenTransition::GoToStrategySelect(StrategyPrompt::Opponent { human })
            }
        }
    }
}
