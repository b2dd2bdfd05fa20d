//! Error types
//!
//! The simulation itself has no failure paths. Errors only come from loading
//! or validating configuration and from match commands issued out of turn.

use thiserror::Error;

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("difficulty multiplier must be a positive finite number, got {0}")]
    InvalidDifficulty(f32),

    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("paddle height {paddle} does not fit a surface of height {surface}")]
    PaddleTooTall { paddle: f32, surface: f32 },

    #[error("win score must be at least 1")]
    ZeroWinScore,

    #[error("key binding for {0} has no keys")]
    EmptyBinding(&'static str),

    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A match command that is not valid in the current phase
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("a match is already being played")]
    AlreadyPlaying,

    #[error("no match has been started yet")]
    NotStarted,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Check that a difficulty multiplier is usable
pub fn check_difficulty(difficulty: f32) -> Result<f32, ConfigError> {
    if difficulty.is_finite() && difficulty > 0.0 {
        Ok(difficulty)
    } else {
        Err(ConfigError::InvalidDifficulty(difficulty))
    }
}
