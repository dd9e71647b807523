use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::paint::Color;
use glowdeck_engine::scene::TextShape;
use glowdeck_engine::text::FontId;

use crate::constraints::Constraints;
use crate::painter::Painter;
use crate::widget::{LayoutCtx, Widget};

/// Static text, wrapped to the available width.
pub struct Label {
    text: String,
    font: FontId,
    size: f32,
    color: Color,
    wrap_width: Option<f32>,
}

impl Label {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            color,
            wrap_width: None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn measure(&mut self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let max_w = constraints.max.x.is_finite().then_some(constraints.max.x);
        self.wrap_width = max_w;
        let size = ctx.measure(&self.text, self.font, self.size, max_w);
        constraints.clamp(size)
    }

    fn paint(&mut self, painter: &mut Painter<'_>, bounds: Rect) {
        let mut shape = TextShape::new(bounds.origin, &*self.text, self.font, self.size, self.color);
        if let Some(w) = self.wrap_width {
            shape = shape.with_max_width(w.min(bounds.width()));
        } else {
            shape = shape.with_max_width(bounds.width());
        }
        painter.draw.text(shape);
    }
}
