//! Engine error types
//!
//! Wrong answers are never errors: they come back as rejected verdicts and
//! feed the failure economy. Errors here mean "ignored, nothing changed".

use std::fmt;

use crate::catalog::PuzzleKind;
use crate::sim::Screen;

/// Player assistance that can be locked out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assist {
    Hint,
    TimerExtension,
    Stealth,
}

impl fmt::Display for Assist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Assist::Hint => "hint",
            Assist::TimerExtension => "timer extension",
            Assist::Stealth => "stealth",
        })
    }
}

/// Errors returned by engine commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Level {0} does not exist")]
    LevelNotFound(u8),

    #[error("Level {0} is locked or out of range")]
    InvalidLevelSelection(u8),

    #[error("Action `{action}` is not valid for {puzzle} puzzles")]
    InvalidPuzzleAction { action: String, puzzle: PuzzleKind },

    #[error("`{command}` is not available on the {screen:?} screen")]
    WrongScreen { command: &'static str, screen: Screen },

    #[error("No puzzle is accepting input")]
    PuzzleInactive,

    #[error("{0} is not available right now")]
    Unavailable(Assist),
}

impl GameError {
    pub(crate) fn invalid_action(action: impl Into<String>, puzzle: PuzzleKind) -> Self {
        GameError::InvalidPuzzleAction {
            action: action.into(),
            puzzle,
        }
    }
}

/// Errors loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value: {0}")]
    Invalid(&'static str),
}
