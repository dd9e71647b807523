use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::paint::Color;
use glowdeck_engine::text::FontId;

use crate::constraints::Constraints;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{LayoutCtx, Widget};

const PAD_X: f32 = 16.0;
const PAD_Y: f32 = 8.0;

/// Push button. Clicks latch until [`Button::take_click`] is read, so the
/// app can poll once per frame.
pub struct Button {
    label: String,
    font: FontId,
    size: f32,
    pub fg: Color,
    pub bg: Color,
    pub bg_hover: Color,
    down: bool,
    clicked: bool,
    enabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, font: FontId, size: f32, fg: Color, bg: Color) -> Self {
        Self {
            label: label.into(),
            font,
            size,
            fg,
            bg,
            bg_hover: bg.with_alpha(0.8),
            down: false,
            clicked: false,
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.down = false;
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// True once per completed click.
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.clicked)
    }
}

impl Widget for Button {
    fn measure(&mut self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let text = ctx.measure(&self.label, self.font, self.size, None);
        constraints.clamp(Vec2::new(text.x + PAD_X * 2.0, text.y + PAD_Y * 2.0))
    }

    fn paint(&mut self, painter: &mut Painter<'_>, bounds: Rect) {
        let bg = if !self.enabled {
            self.bg.with_alpha(0.4)
        } else if painter.pressed(bounds) {
            self.bg_hover.with_alpha(0.9)
        } else if painter.hovered(bounds) {
            self.bg_hover
        } else {
            self.bg
        };
        painter.fill_rect(bounds, bg, 6.0);

        let text_size = painter.measure(&self.label, self.font, self.size, None);
        let pos = Vec2::new(
            bounds.origin.x + (bounds.width() - text_size.x) * 0.5,
            bounds.origin.y + (bounds.height() - text_size.y) * 0.5,
        );
        let fg = if self.enabled {
            self.fg
        } else {
            self.fg.with_alpha(0.5)
        };
        painter.text(pos, &self.label, self.font, self.size, fg);
    }

    fn on_event(&mut self, event: &UiEvent, bounds: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        if !self.enabled {
            return EventResult::Ignored;
        }
        match event {
            UiEvent::PointerDown(p) if bounds.contains(*p) => {
                self.down = true;
                EventResult::Consumed
            }
            UiEvent::PointerUp(p) => {
                let was_down = std::mem::take(&mut self.down);
                if was_down && bounds.contains(*p) {
                    self.clicked = true;
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }
}
