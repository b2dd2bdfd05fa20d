//! Game settings and tunables
//!
//! Read once at start-up. Nothing here is written back; settings do not
//! outlive the session.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, check_difficulty};

/// Difficulty presets offered by the start menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "medium" | "med" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Opponent speed multiplier for this preset
    pub fn multiplier(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 0.5,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 1.5,
        }
    }
}

/// A preset name or a bare multiplier, e.g. `"hard"` or `"1.25"`.
///
/// Only parses; range checking happens when a match starts.
pub fn parse_difficulty(s: &str) -> Option<f32> {
    let s = s.trim();
    DifficultyPreset::from_str(s)
        .map(|preset| preset.multiplier())
        .or_else(|| s.parse().ok())
}

/// Court geometry and physics constants.
///
/// Units are logical surface pixels; speeds are pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub surface_width: f32,
    pub surface_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Human paddle speed, and the opponent's base speed before the multiplier
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_x: f32,
    pub ball_speed_y: f32,
    /// Divisor applied to the opponent's capped step
    pub damping: f32,
    /// Points needed to win a match
    pub win_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            ball_radius: BALL_RADIUS,
            ball_speed_x: BALL_SPEED_X,
            ball_speed_y: BALL_SPEED_Y,
            damping: OPPONENT_DAMPING,
            win_score: WIN_SCORE,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed_x", self.ball_speed_x),
            ("ball_speed_y", self.ball_speed_y),
            ("damping", self.damping),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.paddle_height > self.surface_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                surface: self.surface_height,
            });
        }
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        Ok(())
    }

    /// Paddle `y` that centres it vertically
    pub fn centered_paddle_y(&self) -> f32 {
        self.surface_height / 2.0 - self.paddle_height / 2.0
    }

    /// Largest per-tick opponent step for a given multiplier
    pub fn max_opponent_step(&self, difficulty: f32) -> f32 {
        self.paddle_speed * difficulty / self.damping
    }
}

/// Key names (as reported by `KeyboardEvent.key`) for the two controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: vec!["w".into(), "W".into(), "ArrowUp".into()],
            down: vec!["s".into(), "S".into(), "ArrowDown".into()],
        }
    }
}

/// Audio preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }
}

/// Everything configurable about a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    /// Preset used when the start command does not name a multiplier
    pub difficulty: DifficultyPreset,
    /// Explicit multiplier, takes precedence over `difficulty`
    pub difficulty_override: Option<f32>,
    /// Multiplier used by the autopilot when it drives the human paddle
    pub autoplay_difficulty: f32,
    pub controls: KeyBindings,
    pub audio: AudioSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            difficulty: DifficultyPreset::Normal,
            difficulty_override: None,
            autoplay_difficulty: AUTOPLAY_DIFFICULTY,
            controls: KeyBindings::default(),
            audio: AudioSettings::default(),
        }
    }
}

impl Settings {
    /// Effective difficulty multiplier
    pub fn difficulty(&self) -> f32 {
        self.difficulty_override
            .unwrap_or_else(|| self.difficulty.multiplier())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tuning.validate()?;
        check_difficulty(self.difficulty())?;
        check_difficulty(self.autoplay_difficulty)?;
        if self.controls.up.is_empty() {
            return Err(ConfigError::EmptyBinding("up"));
        }
        if self.controls.down.is_empty() {
            return Err(ConfigError::EmptyBinding("down"));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
