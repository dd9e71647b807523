use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::paint::Color;
use glowdeck_engine::scene::{Border, RoundedRectShape};

use crate::constraints::Constraints;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{LayoutCtx, Widget};

/// Color field backed by a fixed palette; clicking cycles to the next
/// entry. Stands in for a free-form color picker.
pub struct ColorSwatch {
    palette: Vec<(u32, &'static str)>,
    index: usize,
    pub fg: Color,
}

impl ColorSwatch {
    /// `palette` pairs a 0xRRGGBB value with its `#RRGGBB` wire string.
    pub fn new(palette: Vec<(u32, &'static str)>, fg: Color) -> Self {
        assert!(!palette.is_empty(), "swatch needs at least one color");
        Self {
            palette,
            index: 0,
            fg,
        }
    }

    /// Wire-format `#RRGGBB` string of the current color.
    pub fn hex(&self) -> &'static str {
        self.palette[self.index].1
    }

    pub fn color(&self) -> Color {
        Color::from_hex(self.palette[self.index].0)
    }
}

impl Widget for ColorSwatch {
    fn measure(&mut self, constraints: Constraints, _ctx: &LayoutCtx<'_>) -> Vec2 {
        constraints.clamp(Vec2::new(48.0, 28.0))
    }

    fn paint(&mut self, painter: &mut Painter<'_>, bounds: Rect) {
        let ring = if painter.hovered(bounds) {
            Border::new(self.fg, 2.0)
        } else {
            Border::new(self.fg.with_alpha(0.35), 1.0)
        };
        painter.draw.rounded_rect(
            RoundedRectShape::new(bounds, self.color())
                .with_radii(6.0)
                .with_border(ring),
        );
    }

    fn on_event(&mut self, event: &UiEvent, bounds: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        if let UiEvent::PointerDown(p) = event
            && bounds.contains(*p)
        {
            self.index = (self.index + 1) % self.palette.len();
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowdeck_engine::text::FontSystem;

    #[test]
    fn click_cycles_and_wraps() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx {
            fonts: &fonts,
            scale: 1.0,
        };
        let mut swatch = ColorSwatch::new(
            vec![(0x000000, "#000000"), (0x11F4FF, "#11F4FF")],
            Color::WHITE,
        );
        let bounds = Rect::from_xywh(0.0, 0.0, 48.0, 28.0);

        assert_eq!(swatch.hex(), "#000000");
        swatch.on_event(&UiEvent::PointerDown(Vec2::new(5.0, 5.0)), bounds, &ctx);
        assert_eq!(swatch.hex(), "#11F4FF");
        swatch.on_event(&UiEvent::PointerDown(Vec2::new(5.0, 5.0)), bounds, &ctx);
        assert_eq!(swatch.hex(), "#000000");
    }
}
