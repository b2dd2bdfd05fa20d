//! Discrete simulation tick
//!
//! Advances paddles and ball by one step and resolves walls, paddles and
//! scoring in a fixed order.

use super::opponent::pursue;
use super::state::{GameEvent, Side, WorldState};

/// Keyboard control signal for the human paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    #[default]
    Still,
    Down,
}

impl Direction {
    /// -1 (up), 0, +1 (down). Surface `y` grows downward.
    pub fn signal(self) -> i8 {
        match self {
            Direction::Up => -1,
            Direction::Still => 0,
            Direction::Down => 1,
        }
    }
}

/// Human paddle input for one tick. Keyboard and touch never mix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HumanInput {
    /// Move at paddle speed in this direction
    Keys(Direction),
    /// Move by this many pixels (touch drag)
    Drag(f32),
}

impl Default for HumanInput {
    fn default() -> Self {
        HumanInput::Keys(Direction::Still)
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub human: HumanInput,
    /// Drive the human paddle with the pursuit policy at this multiplier
    pub autoplay: Option<f32>,
}

/// Advance the world by one tick and report what happened.
///
/// Order: human paddle, computer paddle, ball motion, walls, left paddle,
/// right paddle, left goal, right goal. A ball that is inside a paddle window
/// and past the goal line in the same tick rebounds *and* scores; the serve
/// reset that follows wins.
pub fn tick(state: &mut WorldState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let tuning = state.tuning;
    let (width, height) = (tuning.surface_width, tuning.surface_height);

    state.time_ticks += 1;

    // Human paddle
    let human_dy = match input.autoplay {
        Some(skill) => pursue(state.ball.pos.y, &state.paddle_a, skill, &tuning),
        None => match input.human {
            HumanInput::Keys(dir) => dir.signal() as f32 * tuning.paddle_speed,
            HumanInput::Drag(dy) => dy,
        },
    };
    state.paddle_a.nudge(human_dy, height);

    // Computer paddle
    let opponent_dy = pursue(state.ball.pos.y, &state.paddle_b, state.difficulty, &tuning);
    state.paddle_b.nudge(opponent_dy, height);

    // Ball motion
    let ball = &mut state.ball;
    ball.pos += ball.vel;

    if ball.pos.y < 0.0 || ball.pos.y > height {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::WallHit);
        log::trace!("Wall hit at ({:.1}, {:.1})", ball.pos.x, ball.pos.y);
    }

    // Paddles. Requiring the ball to be heading in keeps it to one reversal
    // per approach even if it lingers inside the window.
    if ball.pos.x < tuning.paddle_width && ball.vel.x < 0.0 && state.paddle_a.spans(ball.pos.y) {
        ball.vel.x = -ball.vel.x;
        events.push(GameEvent::PaddleHit(Side::A));
        log::trace!("Paddle A return at y={:.1}", ball.pos.y);
    }
    if ball.pos.x > width - tuning.paddle_width
        && ball.vel.x > 0.0
        && state.paddle_b.spans(ball.pos.y)
    {
        ball.vel.x = -ball.vel.x;
        events.push(GameEvent::PaddleHit(Side::B));
        log::trace!("Paddle B return at y={:.1}", ball.pos.y);
    }

    // Goals
    let scorer = if ball.pos.x < 0.0 {
        Some(Side::B)
    } else if ball.pos.x > width {
        Some(Side::A)
    } else {
        None
    };
    if let Some(side) = scorer {
        state.award_point(side);
        events.push(GameEvent::Scored(side));
        log::debug!(
            "Point to {:?}, score {}-{}",
            side,
            state.score_a,
            state.score_b
        );
        state.reset_ball();
    }

    events
}
