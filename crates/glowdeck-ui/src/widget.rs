use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::text::{FontId, FontSystem};

use crate::constraints::Constraints;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

/// Layout-time context: fonts for measuring and the rasterization scale
/// that keeps measured widths aligned with rendered glyphs.
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
    pub scale: f32,
}

impl LayoutCtx<'_> {
    pub fn measure(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.fonts
            .measure_text_scaled(text, font, size, max_width, self.scale)
    }
}

/// One node of the panel tree.
///
/// `measure` reports the size the widget wants under the constraints;
/// the parent then assigns final bounds and calls `paint` and `on_event`
/// with them. Widgets keep their own state across frames.
pub trait Widget {
    fn measure(&mut self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2;

    fn paint(&mut self, painter: &mut Painter<'_>, bounds: Rect);

    fn on_event(&mut self, event: &UiEvent, bounds: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let _ = (event, bounds, ctx);
        EventResult::Ignored
    }
}

/// Boxed widget, for heterogeneous containers.
pub type Element = Box<dyn Widget>;
