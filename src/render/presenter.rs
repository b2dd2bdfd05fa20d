//! Frame presenter
//!
//! Clears the surface and draws paddles, ball and the two score labels.

use super::{Color, Surface};
use crate::names::NameSource;
use crate::sim::{Side, WorldState};

/// Score label font, canvas `font` syntax
pub const SCORE_FONT: &str = "24px Arial";

/// Colours used for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub paddle: Color,
    pub ball: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            paddle: Color::WHITE,
            ball: Color::WHITE,
            text: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Presenter {
    pub palette: Palette,
}

impl Presenter {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Draw one frame. Never touches the world.
    pub fn draw<S, N>(&self, surface: &mut S, world: &WorldState, names: &N)
    where
        S: Surface + ?Sized,
        N: NameSource + ?Sized,
    {
        let palette = self.palette;
        let paddle_width = world.tuning.paddle_width;

        surface.clear();

        for side in [Side::A, Side::B] {
            let paddle = world.paddle(side);
            surface.fill_rect(
                paddle.x,
                paddle.y,
                paddle_width,
                paddle.height,
                palette.paddle,
            );
        }

        let ball = &world.ball;
        surface.fill_circle(ball.pos.x, ball.pos.y, ball.radius, palette.ball);

        let (width, _) = surface.size();
        for (side, x) in [(Side::A, 50.0), (Side::B, width - 150.0)] {
            let label = score_label(&names.name(side), world.score(side));
            surface.draw_text(&label, x, 30.0, SCORE_FONT, palette.text);
        }
    }
}

/// `"<name>: <score>"`
pub fn score_label(name: &str, score: u32) -> String {
    format!("{name}: {score}")
}
