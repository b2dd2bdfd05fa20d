//! Volley Pong - a two-paddle volley game against a reactive computer opponent
//!
//! Core modules:
//! - `sim`: Per-tick simulation (paddle motion, ball motion, collisions, scoring)
//! - `match_state`: Idle/Playing/Finished lifecycle and win detection
//! - `input`: Keyboard and touch translation into a paddle control signal
//! - `names`: Where display names come from
//! - `render`: Drawing surface abstraction and the frame presenter
//! - `audio`: Fire-and-forget sound cues
//! - `scheduler`: Frame loop drivers
//! - `session`: Ties the above together for a host
//! - `settings`: Tunables, difficulty presets, key bindings

pub mod audio;
pub mod error;
pub mod input;
pub mod match_state;
pub mod names;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{CommandError, ConfigError};
pub use match_state::{Match, MatchPhase};
pub use session::Session;
pub use settings::{DifficultyPreset, Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Logical drawing surface size
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Pixels per tick for the human paddle (and opponent base speed)
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED_X: f32 = 4.0;
    pub const BALL_SPEED_Y: f32 = 2.0;

    /// Opponent step divisor (must stay nonzero)
    pub const OPPONENT_DAMPING: f32 = 1.5;

    /// First side to this many points wins
    pub const WIN_SCORE: u32 = 5;

    /// Autopilot skill when it plays the human side
    pub const AUTOPLAY_DIFFICULTY: f32 = 0.4;

    /// Target frame period for the native fixed-rate loop (60 Hz)
    pub const FRAME_MILLIS: u64 = 16;
}
