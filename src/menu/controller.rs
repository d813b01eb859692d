//! Menu controller: the state machine between the menus and the matches.

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tictac_core::{EngineError, EngineErrorKind};
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::menu::screen::{Screen, ScreenTransition};
use crate::menu::screens::{
    MainMenuScreen, MarkSelectScreen, PvpConfirmScreen, StrategySelectScreen,
};
use crate::session::play_match;
use crate::tui::{Tui, draw_popup, wait_for_dismiss};

/// Active screen in the menu state machine.
#[derive(Debug)]
enum ActiveScreen {
    MainMenu(MainMenuScreen),
    PvpConfirm(PvpConfirmScreen),
    MarkSelect(MarkSelectScreen),
    StrategySelect(StrategySelectScreen),
}

impl ActiveScreen {
    fn screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::MainMenu(s) => s,
            ActiveScreen::PvpConfirm(s) => s,
            ActiveScreen::MarkSelect(s) => s,
            ActiveScreen::StrategySelect(s) => s,
        }
    }

    fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::MainMenu(s) => s,
            ActiveScreen::PvpConfirm(s) => s,
            ActiveScreen::MarkSelect(s) => s,
            ActiveScreen::StrategySelect(s) => s,
        }
    }
}

/// Drives the menus and launches matches.
///
/// Call [`MenuController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct MenuController {
    config: Config,
    #[getter(skip)]
    rng: StdRng,
    matches_played: u32,
}

impl MenuController {
    /// Creates a controller seeded from the config, or from the OS when unset.
    #[instrument(skip(config), fields(seed = ?config.seed()))]
    pub fn new(config: Config) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            matches_played: 0,
        }
    }

    /// Runs the menu loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        info!("Starting menu loop");
        let mut screen = ActiveScreen::MainMenu(MainMenuScreen::new());

        loop {
            terminal.draw(|f| screen.screen().render(f))?;

            // Skip key release events (crossterm fires both press and release).
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let transition = screen.screen_mut().handle_key(key.code);

            if let ScreenTransition::StartMatch(lineup) = transition {
                match play_match(terminal, lineup, &self.config, &mut self.rng) {
                    Ok((result, after)) => {
                        self.matches_played += 1;
                        debug!(?result, ?after, "Returning to main menu");
                    }
                    Err(e) => {
                        error!(error = %e, "Match failed");
                        if is_terminal_failure(&e) {
                            return Err(e);
                        }
                        let menu = MainMenuScreen::new();
                        let message = failure_message(&e);
                        terminal.draw(|f| {
                            menu.render(f);
                            draw_popup(f, "Match failed", &message);
                        })?;
                        wait_for_dismiss()?;
                    }
                }
                screen = ActiveScreen::MainMenu(MainMenuScreen::new());
                continue;
            }

            screen = match Self::apply_transition(transition, screen) {
                Some(next) => next,
                None => {
                    info!(matches = self.matches_played, "Menu quitting");
                    return Ok(());
                }
            };
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(current))]
    fn apply_transition(
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        debug!(?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),
            ScreenTransition::GoToMainMenu => Some(ActiveScreen::MainMenu(MainMenuScreen::new())),
            ScreenTransition::GoToPvpConfirm => {
                Some(ActiveScreen::PvpConfirm(PvpConfirmScreen::new()))
            }
            ScreenTransition::GoToMarkSelect => {
                Some(ActiveScreen::MarkSelect(MarkSelectScreen::new()))
            }
            ScreenTransition::GoToStrategySelect(prompt) => Some(ActiveScreen::StrategySelect(
                StrategySelectScreen::new(prompt),
            )),
            // Handled by the loop before reaching here.
            ScreenTransition::StartMatch(_) => {
                Some(ActiveScreen::MainMenu(MainMenuScreen::new()))
            }
            ScreenTransition::Quit => None,
        }
    }
}

/// Checks whether a failed match left the terminal unusable.
///
/// Read and draw failures end the menu. Anything else is shown and the
/// menu carries on.
fn is_terminal_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<std::io::Error>()
            || cause.downcast_ref::<EngineError>().is_some_and(|e| {
                matches!(e.kind, EngineErrorKind::Input(_) | EngineErrorKind::Render(_))
            })
    })
}

/// Popup text for a match that failed but left the terminal usable.
fn failure_message(err: &anyhow::Error) -> String {
    format!("{:#}\n\nEnter/Esc: back to menu", err)
}
