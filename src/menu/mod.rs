//! Menu system: mode, mark and strategy selection in front of the matches.

mod controller;
mod screen;
mod screens;

pub use controller::MenuController;
pub use screen::{Screen, ScreenTransition, StrategyPrompt};
pub use screens::{MainMenuScreen, MarkSelectScreen, PvpConfirmScreen, StrategySelectScreen};
