//! Error types for the engine.

use crate::types::GameStatus;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while driving a match.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// An input other than quit arrived after the match ended.
    #[display("game is already over ({})", _0)]
    GameOver(GameStatus),
    /// A strategy was asked to move on a board with no free cell.
    #[display("no free cell left to choose")]
    NoFreeCell,
    /// The input source could not produce an input.
    #[display("input source failed: {}", _0)]
    Input(String),
    /// The renderer could not draw the snapshot.
    #[display("render failed: {}", _0)]
    Render(String),
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// Error kind.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wraps an input source failure.
    #[track_caller]
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Input(message.into()))
    }

    /// Wraps a renderer failure.
    #[track_caller]
    pub fn render(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Render(message.into()))
    }
}

/// A board handed to [`GameState::from_cells`](crate::GameState::from_cells)
/// that legal alternating play could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid position: {}", message)]
pub struct PositionError {
    /// What is wrong with the position.
    pub message: String,
}

impl PositionError {
    /// Creates a new position error.
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
