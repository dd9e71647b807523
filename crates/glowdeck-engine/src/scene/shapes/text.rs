use crate::coords::Vec2;
use crate::paint::Color;
use crate::text::FontId;

/// A run of text.
///
/// `pos` is the top-left of the line box; `size` is the font size in logical
/// pixels. `max_width` enables wrapping when set.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub pos: Vec2,
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
    pub max_width: Option<f32>,
}

impl TextShape {
    pub fn new(pos: Vec2, text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self {
            pos,
            text: text.into(),
            font,
            size,
            color,
            max_width: None,
        }
    }

    pub fn with_max_width(mut self, max_width: f32) -> Self {
        self.max_width = Some(max_width);
        self
    }
}
