use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::paint::Color;
use glowdeck_engine::scene::CircleShape;
use glowdeck_engine::text::FontId;

use crate::constraints::Constraints;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{LayoutCtx, Widget};

const DOT_RADIUS: f32 = 7.0;
const GAP: f32 = 6.0;
const OPTION_GAP: f32 = 16.0;

/// Horizontal row of mutually exclusive options. Exactly one is selected
/// at all times.
pub struct RadioGroup<T: Copy + PartialEq> {
    options: Vec<(T, String)>,
    selected: usize,
    font: FontId,
    size: f32,
    pub fg: Color,
    pub accent: Color,
    changed: bool,
}

impl<T: Copy + PartialEq> RadioGroup<T> {
    pub fn new(options: Vec<(T, String)>, font: FontId, size: f32, fg: Color, accent: Color) -> Self {
        assert!(!options.is_empty(), "radio group needs at least one option");
        Self {
            options,
            selected: 0,
            font,
            size,
            fg,
            accent,
            changed: false,
        }
    }

    pub fn selected(&self) -> T {
        self.options[self.selected].0
    }

    pub fn select(&mut self, value: T) {
        if let Some(i) = self.options.iter().position(|(v, _)| *v == value) {
            self.selected = i;
        }
    }

    /// True once after the selection changed via pointer input.
    pub fn take_change(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    fn option_rects(&self, bounds: Rect, ctx: &LayoutCtx<'_>) -> Vec<Rect> {
        let mut x = bounds.origin.x;
        self.options
            .iter()
            .map(|(_, label)| {
                let text = ctx.measure(label, self.font, self.size, None);
                let w = DOT_RADIUS * 2.0 + GAP + text.x;
                let rect = Rect::from_xywh(x, bounds.origin.y, w, bounds.height());
                x += w + OPTION_GAP;
                rect
            })
            .collect()
    }
}

impl<T: Copy + PartialEq> Widget for RadioGroup<T> {
    fn measure(&mut self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let mut w = 0.0f32;
        let mut h = DOT_RADIUS * 2.0;
        for (i, (_, label)) in self.options.iter().enumerate() {
            let text = ctx.measure(label, self.font, self.size, None);
            w += DOT_RADIUS * 2.0 + GAP + text.x;
            if i + 1 < self.options.len() {
                w += OPTION_GAP;
            }
            h = h.max(text.y);
        }
        constraints.clamp(Vec2::new(w, h))
    }

    fn paint(&mut self, painter: &mut Painter<'_>, bounds: Rect) {
        let ctx = LayoutCtx {
            fonts: painter.fonts,
            scale: painter.scale,
        };
        let rects = self.option_rects(bounds, &ctx);
        for (i, ((_, label), rect)) in self.options.iter().zip(&rects).enumerate() {
            let center = Vec2::new(
                rect.origin.x + DOT_RADIUS,
                rect.origin.y + rect.height() * 0.5,
            );
            if i == self.selected {
                painter.draw.circle(
                    CircleShape::new(center, DOT_RADIUS, self.accent.with_alpha(0.25))
                        .with_ring(self.accent, 2.0),
                );
                painter
                    .draw
                    .circle(CircleShape::new(center, DOT_RADIUS * 0.45, self.accent));
            } else {
                painter.draw.circle(
                    CircleShape::new(center, DOT_RADIUS, Color::TRANSPARENT)
                        .with_ring(self.fg.with_alpha(0.5), 1.5),
                );
            }

            let text_size = painter.measure(label, self.font, self.size, None);
            let pos = Vec2::new(
                rect.origin.x + DOT_RADIUS * 2.0 + GAP,
                rect.origin.y + (rect.height() - text_size.y) * 0.5,
            );
            painter.text(pos, label, self.font, self.size, self.fg);
        }
    }

    fn on_event(&mut self, event: &UiEvent, bounds: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let UiEvent::PointerDown(p) = event else {
            return EventResult::Ignored;
        };
        for (i, rect) in self.option_rects(bounds, ctx).iter().enumerate() {
            if rect.contains(*p) {
                if i != self.selected {
                    self.selected = i;
                    self.changed = true;
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowdeck_engine::text::FontSystem;

    #[test]
    fn click_moves_selection_and_latches_change() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx {
            fonts: &fonts,
            scale: 1.0,
        };
        let mut group = RadioGroup::new(
            vec![(0u8, "solid".into()), (1u8, "gradient".into())],
            FontId::invalid(),
            14.0,
            Color::WHITE,
            Color::from_hex(0x11F4FF),
        );
        let bounds = Rect::from_xywh(0.0, 0.0, 300.0, 20.0);

        assert_eq!(group.selected(), 0);
        // Second option starts after dot + gap + (empty) label + option gap.
        let second_x = DOT_RADIUS * 2.0 + GAP + OPTION_GAP + 1.0;
        let result = group.on_event(
            &UiEvent::PointerDown(Vec2::new(second_x, 10.0)),
            bounds,
            &ctx,
        );
        assert_eq!(result, EventResult::Consumed);
        assert_eq!(group.selected(), 1);
        assert!(group.take_change());
        assert!(!group.take_change());
    }
}
