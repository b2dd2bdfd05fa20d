//! Surface that records draw calls, for tests

use super::{Color, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect(f32, f32, f32, f32, Color),
    Circle(f32, f32, f32, Color),
    Text(String, f32, f32, String),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.calls.push(DrawCall::Rect(x, y, w, h, color));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        self.calls.push(DrawCall::Circle(cx, cy, r, color));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &str, _color: Color) {
        self.calls
            .push(DrawCall::Text(text.to_string(), x, y, font.to_string()));
    }
}
