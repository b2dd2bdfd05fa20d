//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One discrete step per call, no wall-clock time
//! - Seeded RNG only (serve direction after a point)
//! - No rendering, audio or platform dependencies

pub mod opponent;
pub mod state;
pub mod tick;

pub use opponent::pursue;
pub use state::{Ball, GameEvent, Paddle, Side, WorldState};
pub use tick::{Direction, HumanInput, TickInput, tick};
