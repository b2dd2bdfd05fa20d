//! World state and core simulation types
//!
//! Everything the per-tick step reads or writes lives in [`WorldState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Tuning;

/// Side of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, human controlled
    A,
    /// Right paddle, computer controlled
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom edge
    WallHit,
    /// Ball rebounded off this side's paddle
    PaddleHit(Side),
    /// This side won the point
    Scored(Side),
}

/// A paddle. Only `y` moves; `x` is fixed by the side it plays on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub height: f32,
}

impl Paddle {
    /// Vertically centred paddle for the given side
    pub fn centered(side: Side, tuning: &Tuning) -> Self {
        let x = match side {
            Side::A => 0.0,
            Side::B => tuning.surface_width - tuning.paddle_width,
        };
        Self {
            x,
            y: tuning.centered_paddle_y(),
            height: tuning.paddle_height,
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether `y` lies strictly inside the paddle span
    #[inline]
    pub fn spans(&self, y: f32) -> bool {
        y > self.y && y < self.y + self.height
    }

    /// Move by `dy` and clamp into the surface. Non-finite deltas are dropped.
    pub fn nudge(&mut self, dy: f32, surface_height: f32) {
        if !dy.is_finite() {
            return;
        }
        self.y += dy;
        self.clamp(surface_height);
    }

    /// Keep the whole paddle within `[0, surface_height]`
    pub fn clamp(&mut self, surface_height: f32) {
        let max_y = (surface_height - self.height).max(0.0);
        self.y = self.y.clamp(0.0, max_y);
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the centre with the default serve velocity
    pub fn serve(tuning: &Tuning) -> Self {
        Self {
            pos: center(tuning),
            vel: Vec2::new(tuning.ball_speed_x, tuning.ball_speed_y),
            radius: tuning.ball_radius,
        }
    }
}

#[inline]
fn center(tuning: &Tuning) -> Vec2 {
    Vec2::new(tuning.surface_width / 2.0, tuning.surface_height / 2.0)
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Geometry and speeds the world was built with
    pub tuning: Tuning,
    /// Human paddle (left)
    pub paddle_a: Paddle,
    /// Computer paddle (right)
    pub paddle_b: Paddle,
    pub ball: Ball,
    pub score_a: u32,
    pub score_b: u32,
    /// Opponent speed multiplier, fixed for the match
    pub difficulty: f32,
    /// Seed of the serve-direction RNG
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

impl WorldState {
    /// Fresh world: scores at zero, paddles and ball centred
    pub fn new(tuning: Tuning, difficulty: f32, seed: u64) -> Self {
        Self {
            tuning,
            paddle_a: Paddle::centered(Side::A, &tuning),
            paddle_b: Paddle::centered(Side::B, &tuning),
            ball: Ball::serve(&tuning),
            score_a: 0,
            score_b: 0,
            difficulty,
            seed,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Full reset for a restart. Difficulty and RNG stream carry over.
    pub fn reset(&mut self) {
        let tuning = self.tuning;
        self.paddle_a = Paddle::centered(Side::A, &tuning);
        self.paddle_b = Paddle::centered(Side::B, &tuning);
        self.ball = Ball::serve(&tuning);
        self.score_a = 0;
        self.score_b = 0;
        self.time_ticks = 0;
    }

    /// Re-serve after a point: centre the ball, reverse `vx`, pick a random
    /// vertical direction. Scores and paddles are untouched.
    pub fn reset_ball(&mut self) {
        let up: bool = self.rng.random();
        let sign = if up { -1.0 } else { 1.0 };
        self.ball.pos = center(&self.tuning);
        self.ball.vel.x = -self.ball.vel.x;
        self.ball.vel.y = self.tuning.ball_speed_y * sign;
        log::debug!(
            "Serve from centre, vx={} vy={} (score {}-{})",
            self.ball.vel.x,
            self.ball.vel.y,
            self.score_a,
            self.score_b
        );
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::A => &self.paddle_a,
            Side::B => &self.paddle_b,
        }
    }

    /// Credit a point to `side`
    pub(crate) fn award_point(&mut self, side: Side) {
        match side {
            Side::A => self.score_a += 1,
            Side::B => self.score_b += 1,
        }
    }

    /// Side that has reached the win score, if any (A checked first)
    pub fn leader_at(&self, win_score: u32) -> Option<Side> {
        if self.score_a >= win_score {
            Some(Side::A)
        } else if self.score_b >= win_score {
            Some(Side::B)
        } else {
            None
        }
    }
}
