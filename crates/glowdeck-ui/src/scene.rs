use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::scene::DrawList;
use glowdeck_engine::text::FontSystem;

use crate::constraints::Constraints;
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::{LayoutCtx, Widget};

/// Drives one widget tree for one surface.
///
/// Per frame: route the frame's events, measure the root against the
/// surface, then paint into the owned draw list. Events go through the
/// same layout the previous paint used, which is stable because widget
/// sizes only change in response to those events.
pub struct UiScene {
    draw: DrawList,
    size: Vec2,
    pointer: Option<Vec2>,
    pointer_down: bool,
}

impl UiScene {
    pub fn new(size: Vec2) -> Self {
        Self {
            draw: DrawList::new(),
            size,
            pointer: None,
            pointer_down: false,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Draw list from the last [`UiScene::frame`] call.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    /// Runs a full frame and returns the draw list to hand to the
    /// renderers.
    pub fn frame(
        &mut self,
        root: &mut dyn Widget,
        fonts: &FontSystem,
        scale: f32,
        events: &[UiEvent],
    ) -> &DrawList {
        let ctx = LayoutCtx { fonts, scale };
        let bounds = Rect::new(Vec2::ZERO, self.size);

        for event in events {
            match event {
                UiEvent::PointerMoved(p) => self.pointer = Some(*p),
                UiEvent::PointerDown(_) => self.pointer_down = true,
                UiEvent::PointerUp(_) => self.pointer_down = false,
                _ => {}
            }
            root.on_event(event, bounds, &ctx);
        }

        root.measure(Constraints::tight(self.size), &ctx);

        self.draw.clear();
        let mut painter = Painter::new(
            &mut self.draw,
            fonts,
            scale,
            self.pointer,
            self.pointer_down,
        );
        root.paint(&mut painter, bounds);
        &self.draw
    }
}
