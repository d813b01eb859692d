//! Strategy selection for a machine seat.

use crossterm::event::KeyCode;
use ratatui::Frame;
use strum::IntoEnumIterator;
use tictac_core::{Mark, StrategyKind};
use tracing::{info, instrument};

use super::{ListAction, OptionList};
use crate::lineup::{Lineup, Seat};
use crate::menu::screen::{Screen, ScreenTransition, StrategyPrompt};

/// Strategy menu for one machine seat.
#[derive(Debug)]
pub struct StrategySelectScreen {
    prompt: StrategyPrompt,
    list: OptionList<StrategyKind>,
}

fn strategy_options() -> Vec<(StrategyKind, String)> {
    StrategyKind::iter()
        .map(|kind| (kind, kind.label().to_string()))
        .collect()
}

impl StrategySelectScreen {
    /// Creates the menu for the seat described by `prompt`.
    #[instrument]
    pub fn new(prompt: StrategyPrompt) -> Self {
        let seat = match prompt {
            StrategyPrompt::Opponent { human } => human.opponent(),
            StrategyPrompt::MachineX => Mark::X,
            StrategyPrompt::MachineO { .. } => Mark::O,
        };
        Self {
            prompt,
            list: OptionList::new(format!("Strategy for {}", seat), strategy_options()),
        }
    }

    /// Returns what this menu is choosing for.
    pub fn prompt(&self) -> StrategyPrompt {
        self.prompt
    }

    fn chosen(&self, kind: StrategyKind) -> ScreenTransition {
        match self.prompt {
            StrategyPrompt::Opponent { human: Mark::X } => {
                ScreenTransition::StartMatch(Lineup::new(Seat::Human, Seat::Machine(kind)))
            }
            StrategyPrompt::Opponent { human: Mark::O } => {
                ScreenTransition::StartMatch(Lineup::new(Seat::Machine(kind), Seat::Human))
            }
            StrategyPrompt::MachineX => {
                ScreenTransition::GoToStrategySelect(StrategyPrompt::MachineO { x: kind })
            }
            StrategyPrompt::MachineO { x } => {
                ScreenTransition::StartMatch(Lineup::new(Seat::Machine(x), Seat::Machine(kind)))
            }
        }
    }

    fn cancelled(&self) -> ScreenTransition {
        match self.prompt {
            StrategyPrompt::Opponent { .. } => ScreenTransition::GoToMarkSelect,
            StrategyPrompt::MachineX => ScreenTransition::GoToMainMenu,
            StrategyPrompt::MachineO { .. } => {
                ScreenTransition::GoToStrategySelect(StrategyPrompt::MachineX)
            }
        }
    }
}

impl Screen for StrategySelectScreen {
    fn render(&self, frame: &mut Frame) {
        let header = match self.prompt {
            StrategyPrompt::Opponent { .. } => "Player vs Machine",
            StrategyPrompt::MachineX | StrategyPrompt::MachineO { .. } => "Machine vs Machine",
        };
        self.list.render(
            frame,
            header,
            "↑↓/WS: navigate | Enter/Space: select | Q/Esc: back",
        );
    }

    #[instrument(skip(self), fields(prompt = ?self.prompt))]
    fn handle_key(&mut self, code: KeyCode) -> ScreenTransition {
        match self.list.handle_key(code) {
            ListAction::None => ScreenTransition::Stay,
            ListAction::Cancelled => self.cancelled(),
            ListAction::Chosen(kind) => {
                info!(%kind, "Strategy chosen");
                self.chosen(kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_vs_machine_chain() {
        let mut first = StrategySelectScreen::new(StrategyPrompt::MachineX);
        let next = first.handle_key(KeyCode::Enter);
        let ScreenTransition::GoToStrategySelect(prompt) = next else {
            panic!("expected second strategy menu, got {next:?}");
        };
        let mut second = StrategySelectScreen::new(prompt);
        second.handle_key(KeyCode::Down);
        let ScreenTransition::StartMatch(lineup) = second.handle_key(KeyCode::Enter) else {
            panic!("expected match start");
        };
        assert!(matches!(lineup.x, Seat::Machine(_)));
        assert!(matches!(lineup.o, Seat::Machine(_)));
        assert_ne!(lineup.x, lineup.o);
    }

    #[test]
    fn test_cancel_steps_back() {
        let mut second =
            StrategySelectScreen::new(StrategyPrompt::MachineO { x: StrategyKind::Random });
        assert_eq!(
            second.handle_key(KeyCode::Esc),
            ScreenTransition::GoToStrategySelect(StrategyPrompt::MachineX)
        );

        let mut opponent =
            StrategySelectScreen::new(StrategyPrompt::Opponent { human: Mark::O });
        assert_eq!(opponent.handle_key(KeyCode::Esc), ScreenTransition::GoToMarkSelect);
    }

    #[test]
    fn test_human_keeps_chosen_mark() {
        let mut screen = StrategySelectScreen::new(StrategyPrompt::Opponent { human: Mark::O });
        let ScreenTransition::StartMatch(lineup) = screen.handle_key(KeyCode::Enter) else {
            panic!("expected match start");
        };
        assert_eq!(lineup.o, Seat::Human);
        assert_eq!(lineup.x, Seat::Machine(StrategyKind::Random));
    }
}
