//! One match played in the terminal.

use anyhow::Result;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;
use tictac_core::{Game, Mark, Match, MatchResult};
use tracing::{info, instrument};

use crate::config::Config;
use crate::lineup::Lineup;
use crate::tui::{MatchView, Tui, TuiRenderer, wait_for_dismiss};

/// What the player chose once the match was over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterMatch {
    /// Confirmed the result.
    Continue,
    /// Cancelled out of the result screen or quit mid-match.
    Back,
}

/// Plays one match of `lineup` and waits for the result to be dismissed.
///
/// The starter is drawn from `rng` and announced in a popup for
/// `config.popup_ms()` before the first round. A result decided on the
/// board is animated before waiting.
#[instrument(skip(terminal, config, rng))]
pub fn play_match(
    terminal: &mut Tui,
    lineup: Lineup,
    config: &Config,
    rng: &mut StdRng,
) -> Result<(MatchResult, AfterMatch)> {
    let game = Game::with_random_starter(rng);
    let starter = game.state().starter();

    let view = MatchView {
        x_label: lineup.x.label(),
        o_label: lineup.o.label(),
    };
    let mut renderer = TuiRenderer::new(terminal, view, *config.pacing(), rng.r#gen());

    if *config.popup_ms() > 0 {
        renderer.render_with_popup(game.state(), "Coin toss", &format!("{} starts", starter))?;
        std::thread::sleep(Duration::from_millis(*config.popup_ms()));
    }

    let seat_x = lineup.x.input_source(Mark::X, *config.pacing(), rng.r#gen());
    let seat_o = lineup.o.input_source(Mark::O, *config.pacing(), rng.r#gen());
    let mut game_match = Match::new(game, seat_x, seat_o);

    let result = game_match.run(&mut renderer)?;
    info!(?result, moves = game_match.game().state().moves(), "Match over");

    let after = match result {
        MatchResult::Cancelled => AfterMatch::Back,
        MatchResult::Finished(_) => {
            if wait_for_dismiss()? {
                AfterMatch::Continue
            } else {
                AfterMatch::Back
            }
        }
    };
    Ok((result, after))
}
