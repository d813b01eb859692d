//! Main menu: pick a match mode or quit.

use crossterm::event::KeyCode;
use ratatui::Frame;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

use super::{ListAction, OptionList};
use crate::lineup::MatchMode;
use crate::menu::screen::{Screen, ScreenTransition, StrategyPrompt};

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Play(MatchMode),
    Quit,
}

/// State for the main menu screen.
#[derive(Debug)]
pub struct MainMenuScreen {
    list: OptionList<MenuOption>,
}

impl MainMenuScreen {
    /// Creates the main menu with the first entry selected.
    #[instrument]
    pub fn new() -> Self {
        let mut options: Vec<_> = MatchMode::iter()
            .map(|mode| (MenuOption::Play(mode), mode.to_string()))
            .collect();
        options.push((MenuOption::Quit, "Quit".to_string()));
        Self {
            list: OptionList::new("Menu", options),
        }
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainMenuScreen {
    fn render(&self, frame: &mut Frame) {
        self.list.render(
            frame,
            "Tic-Tac-Toe",
            "↑↓/WS: navigate | Enter/Space: select | Q/Esc: quit",
        );
    }

    #[instrument(skip(self))]
    fn handle_key(&mut self, code: KeyCode) -> ScreenTransition {
        match self.list.handle_key(code) {
            ListAction::None => ScreenTransition::Stay,
            ListAction::Cancelled | ListAction::Chosen(MenuOption::Quit) => ScreenTransition::Quit,
            ListAction::Chosen(MenuOption::Play(mode)) => {
                info!(%mode, "Mode selected");
                match mode {
                    MatchMode::Pvp => ScreenTransition::GoToPvpConfirm,
                    MatchMode::Pvm => ScreenTransition::GoToMarkSelect,
                    MatchMode::Mvm => {
                        ScreenTransition::GoToStrategySelect(StrategyPrompt::MachineX)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_route_to_sub_menus() {
        let mut screen = MainMenuScreen::new();
        assert_eq!(screen.handle_key(KeyCode::Enter), ScreenTransition::GoToPvpConfirm);
        screen.handle_key(KeyCode::Down);
        assert_eq!(screen.handle_key(KeyCode::Enter), ScreenTransition::GoToMarkSelect);
        screen.handle_key(KeyCode::Down);
        assert_eq!(
            screen.handle_key(KeyCode::Enter),
            ScreenTransition::GoToStrategySelect(StrategyPrompt::MachineX)
        );
        screen.handle_key(KeyCode::Down);
        assert_eq!(screen.handle_key(KeyCode::Enter), ScreenTransition::Quit);
    }

    #[test]
    fn test_escape_quits() {
        let mut screen = MainMenuScreen::new();
        assert_eq!(screen.handle_key(KeyCode::Esc), ScreenTransition::Quit);
    }
}
