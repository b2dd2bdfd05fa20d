//! Rendering
//!
//! The presenter only reads the world and issues draw calls on a [`Surface`].
//! The browser backs the surface with a 2D canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod presenter;
#[cfg(test)]
pub(crate) mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use presenter::{Palette, Presenter};

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, usable as a canvas fill style
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A 2D drawing target with a fixed logical size
pub trait Surface {
    /// Logical (width, height)
    fn size(&self) -> (f32, f32);
    /// Wipe the whole surface
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color);
    /// Draw `text` with its baseline starting at (x, y)
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Color);
}
