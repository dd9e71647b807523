use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::paint::Color;
use glowdeck_engine::scene::{Border, RoundedRectShape, TextShape};
use glowdeck_engine::text::FontId;

use crate::constraints::Constraints;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{LayoutCtx, Widget};

use glowdeck_engine::input::Key;

const PAD: f32 = 8.0;

/// Single-line text input. Focus follows pointer-down: inside focuses,
/// outside blurs. Editing is append/backspace at the end of the line.
pub struct Textbox {
    value: String,
    placeholder: String,
    font: FontId,
    size: f32,
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    focused: bool,
    height: f32,
}

impl Textbox {
    pub fn new(
        placeholder: impl Into<String>,
        font: FontId,
        size: f32,
        fg: Color,
        bg: Color,
        accent: Color,
    ) -> Self {
        Self {
            value: String::new(),
            placeholder: placeholder.into(),
            font,
            size,
            fg,
            bg,
            accent,
            focused: false,
            height: 0.0,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Widget for Textbox {
    fn measure(&mut self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let line = ctx.measure("Ag", self.font, self.size, None);
        self.height = line.y + PAD * 2.0;
        constraints.clamp(Vec2::new(constraints.max.x, self.height))
    }

    fn paint(&mut self, painter: &mut Painter<'_>, bounds: Rect) {
        let border = if self.focused {
            Border::new(self.accent, 2.0)
        } else {
            Border::new(self.fg.with_alpha(0.25), 1.0)
        };
        painter.draw.rounded_rect(
            RoundedRectShape::new(bounds, self.bg)
                .with_radii(6.0)
                .with_border(border),
        );

        let inner = bounds.inset(PAD);
        painter.draw.push_clip(inner);

        let (text, color) = if self.value.is_empty() && !self.focused {
            (self.placeholder.as_str(), self.fg.with_alpha(0.4))
        } else {
            (self.value.as_str(), self.fg)
        };

        // Keep the line end in view when the value overflows.
        let text_w = painter.measure(text, self.font, self.size, None).x;
        let offset = (text_w - inner.width()).max(0.0);
        let pos = Vec2::new(inner.origin.x - offset, inner.origin.y);
        painter
            .draw
            .text(TextShape::new(pos, text, self.font, self.size, color));

        if self.focused {
            let caret_x = (inner.origin.x - offset
                + painter.measure(&self.value, self.font, self.size, None).x)
                .min(inner.max().x - 1.0);
            painter.fill_rect(
                Rect::from_xywh(caret_x, inner.origin.y, 2.0, inner.height()),
                self.accent,
                0.0,
            );
        }

        painter.draw.pop_clip();
    }

    fn on_event(&mut self, event: &UiEvent, bounds: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        match event {
            UiEvent::PointerDown(p) => {
                self.focused = bounds.contains(*p);
                if self.focused {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            UiEvent::Text(s) if self.focused => {
                self.value.push_str(s);
                EventResult::Consumed
            }
            UiEvent::Key(Key::Backspace) if self.focused => {
                self.value.pop();
                EventResult::Consumed
            }
            UiEvent::Key(Key::Escape) if self.focused => {
                self.focused = false;
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowdeck_engine::text::FontSystem;

    fn ctx(fonts: &FontSystem) -> LayoutCtx<'_> {
        LayoutCtx { fonts, scale: 1.0 }
    }

    fn textbox() -> Textbox {
        Textbox::new(
            "https://...",
            FontId::invalid(),
            14.0,
            Color::WHITE,
            Color::BLACK,
            Color::from_hex(0x11F4FF),
        )
    }

    #[test]
    fn focus_follows_pointer_down() {
        let fonts = FontSystem::new();
        let c = ctx(&fonts);
        let mut tb = textbox();
        let bounds = Rect::from_xywh(0.0, 0.0, 200.0, 32.0);

        tb.on_event(&UiEvent::PointerDown(Vec2::new(10.0, 10.0)), bounds, &c);
        assert!(tb.is_focused());
        tb.on_event(&UiEvent::PointerDown(Vec2::new(500.0, 10.0)), bounds, &c);
        assert!(!tb.is_focused());
    }

    #[test]
    fn text_only_lands_when_focused() {
        let fonts = FontSystem::new();
        let c = ctx(&fonts);
        let mut tb = textbox();
        let bounds = Rect::from_xywh(0.0, 0.0, 200.0, 32.0);

        tb.on_event(&UiEvent::Text("a".into()), bounds, &c);
        assert_eq!(tb.value(), "");

        tb.on_event(&UiEvent::PointerDown(Vec2::new(10.0, 10.0)), bounds, &c);
        tb.on_event(&UiEvent::Text("ab".into()), bounds, &c);
        tb.on_event(&UiEvent::Key(Key::Backspace), bounds, &c);
        assert_eq!(tb.value(), "a");
    }
}
