//! Reactive paddle policy
//!
//! Moves a paddle toward the ball's height with a capped, damped step. Used
//! for the computer paddle, and for the human paddle when autoplay is on.

use super::state::Paddle;
use crate::settings::Tuning;

/// Vertical displacement for `paddle` this tick.
///
/// The step is `min(paddle_speed * difficulty, |distance|) / damping` toward
/// the ball, where `distance` is measured from the paddle's centre. It can
/// never exceed `paddle_speed * difficulty / damping` and never overshoots.
pub fn pursue(ball_y: f32, paddle: &Paddle, difficulty: f32, tuning: &Tuning) -> f32 {
    let distance = ball_y - paddle.center_y();
    if distance == 0.0 || !distance.is_finite() {
        return 0.0;
    }
    let cap = tuning.paddle_speed * difficulty;
    distance.signum() * cap.min(distance.abs()) / tuning.damping
}
