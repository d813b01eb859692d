//! Screen implementations for the menu state machine.

mod main_menu;
mod mark_select;
mod pvp_confirm;
mod strategy_select;

pub use main_menu::MainMenuScreen;
pub use mark_select::MarkSelectScreen;
pub use pvp_confirm::PvpConfirmScreen;
pub use strategy_select::StrategySelectScreen;

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tictac_core::{Direction as Step, GameInput};
use tracing::instrument;

use crate::tui::map_key;

/// What a key did to an [`OptionList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListAction<T> {
    /// Selection moved or the key was ignored.
    None,
    /// An option was confirmed.
    Chosen(T),
    /// The list was cancelled.
    Cancelled,
}

/// A titled, scrollable list of options.
#[derive(Debug)]
pub(crate) struct OptionList<T> {
    title: String,
    options: Vec<(T, String)>,
    list_state: ListState,
}

impl<T: Copy> OptionList<T> {
    pub(crate) fn new(title: impl Into<String>, options: Vec<(T, String)>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            title: title.into(),
            options,
            list_state,
        }
    }

    fn select_previous(&mut self) {
        let count = self.options.len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count.saturating_sub(1),
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = self.options.len().max(1);
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Returns the highlighted option.
    pub(crate) fn selected(&self) -> Option<T> {
        let idx = self.list_state.selected().unwrap_or(0);
        self.options.get(idx).map(|(value, _)| *value)
    }

    /// Applies a key using the board key bindings.
    #[instrument(skip(self))]
    pub(crate) fn handle_key(&mut self, code: KeyCode) -> ListAction<T> {
        match map_key(code) {
            Some(GameInput::Move(Step::Up)) => {
                self.select_previous();
                ListAction::None
            }
            Some(GameInput::Move(Step::Down)) => {
                self.select_next();
                ListAction::None
            }
            Some(GameInput::Place) => match self.selected() {
                Some(value) => ListAction::Chosen(value),
                None => ListAction::None,
            },
            Some(GameInput::Quit) => ListAction::Cancelled,
            _ => ListAction::None,
        }
    }

    /// Draws the list with a header line and key help.
    pub(crate) fn render(&self, frame: &mut Frame, header: &str, help: &str) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(header.to_string())
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|(_, label)| ListItem::new(label.clone()))
            .collect();

        let menu = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title.clone()),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let help = Paragraph::new(help.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> OptionList<u8> {
        OptionList::new(
            "Numbers",
            vec![(1, "one".into()), (2, "two".into()), (3, "three".into())],
        )
    }

    #[test]
    fn test_selection_wraps() {
        let mut list = list();
        assert_eq!(list.selected(), Some(1));
        assert_eq!(list.handle_key(KeyCode::Up), ListAction::None);
        assert_eq!(list.selected(), Some(3));
        list.handle_key(KeyCode::Char('s'));
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn test_choose_and_cancel() {
        let mut list = list();
        list.handle_key(KeyCode::Down);
        assert_eq!(list.handle_key(KeyCode::Enter), ListAction::Chosen(2));
        assert_eq!(list.handle_key(KeyCode::Esc), ListAction::Cancelled);
        assert_eq!(list.handle_key(KeyCode::Char('x')), ListAction::None);
    }
}
