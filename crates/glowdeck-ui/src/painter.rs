use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::paint::{Color, Fill};
use glowdeck_engine::scene::{DrawList, RoundedRectShape, TextShape};
use glowdeck_engine::text::{FontId, FontSystem};

/// Paint-time access bundle handed to widgets: the draw list being built,
/// the fonts for measuring, and the pointer state for hover styling.
pub struct Painter<'a> {
    pub draw: &'a mut DrawList,
    pub fonts: &'a FontSystem,
    pub scale: f32,
    pointer: Option<Vec2>,
    pointer_down: bool,
}

impl<'a> Painter<'a> {
    pub fn new(
        draw: &'a mut DrawList,
        fonts: &'a FontSystem,
        scale: f32,
        pointer: Option<Vec2>,
        pointer_down: bool,
    ) -> Self {
        Self {
            draw,
            fonts,
            scale,
            pointer,
            pointer_down,
        }
    }

    pub fn hovered(&self, bounds: Rect) -> bool {
        self.pointer.is_some_and(|p| bounds.contains(p))
    }

    pub fn pressed(&self, bounds: Rect) -> bool {
        self.pointer_down && self.hovered(bounds)
    }

    pub fn measure(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.fonts
            .measure_text_scaled(text, font, size, max_width, self.scale)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.draw
            .rounded_rect(RoundedRectShape::new(rect, color).with_radii(radius));
    }

    /// Like [`fill_rect`](Self::fill_rect) but accepts any fill, including
    /// gradients.
    pub fn fill(&mut self, rect: Rect, fill: impl Into<Fill>, radius: f32) {
        self.draw
            .rounded_rect(RoundedRectShape::new(rect, fill).with_radii(radius));
    }

    pub fn text(&mut self, pos: Vec2, text: &str, font: FontId, size: f32, color: Color) {
        self.draw
            .text(TextShape::new(pos, text, font, size, color));
    }
}
