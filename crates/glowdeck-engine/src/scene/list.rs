use crate::coords::Rect;

use super::cmd::DrawCmd;
use super::shapes::{CircleShape, ImageShape, RoundedRectShape, TextShape};

/// Ordered list of draw commands for one frame of 2D content.
///
/// Commands draw in the order they were pushed. Clips nest: `push_clip`
/// intersects with the enclosing clip, so a shape is never visible outside
/// any of its ancestors.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
    clip_stack: Vec<Rect>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
        self.clip_stack.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Current effective clip, if any clip is active.
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.current_clip() {
            Some(outer) => outer.intersect(&rect).unwrap_or(Rect::ZERO),
            None => rect,
        };
        self.clip_stack.push(effective);
        self.cmds.push(DrawCmd::PushClip(effective));
    }

    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_some() {
            self.cmds.push(DrawCmd::PopClip);
        } else {
            log::warn!("pop_clip with empty clip stack");
        }
    }

    pub fn rounded_rect(&mut self, shape: RoundedRectShape) {
        self.cmds.push(DrawCmd::RoundedRect(shape));
    }

    pub fn circle(&mut self, shape: CircleShape) {
        self.cmds.push(DrawCmd::Circle(shape));
    }

    pub fn text(&mut self, shape: TextShape) {
        self.cmds.push(DrawCmd::Text(shape));
    }

    pub fn image(&mut self, shape: ImageShape) {
        self.cmds.push(DrawCmd::Image(shape));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn commands_keep_insertion_order() {
        let mut list = DrawList::new();
        list.rounded_rect(RoundedRectShape::new(
            Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
            Color::BLACK,
        ));
        list.text(TextShape::new(
            Vec2::ZERO,
            "hi",
            crate::text::FontId(0),
            14.0,
            Color::WHITE,
        ));
        let kinds: Vec<_> = list
            .cmds()
            .iter()
            .map(|c| std::mem::discriminant(c))
            .collect();
        assert_eq!(kinds.len(), 2);
        assert_ne!(kinds[0], kinds[1]);
        assert!(matches!(list.cmds()[0], DrawCmd::RoundedRect(_)));
    }

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        list.push_clip(Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::from_xywh(50.0, 50.0, 100.0, 100.0));
        assert_eq!(
            list.current_clip(),
            Some(Rect::from_xywh(50.0, 50.0, 50.0, 50.0))
        );
        list.pop_clip();
        assert_eq!(
            list.current_clip(),
            Some(Rect::from_xywh(0.0, 0.0, 100.0, 100.0))
        );
    }

    #[test]
    fn disjoint_nested_clip_collapses_to_zero() {
        let mut list = DrawList::new();
        list.push_clip(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::from_xywh(20.0, 20.0, 10.0, 10.0));
        assert_eq!(list.current_clip(), Some(Rect::ZERO));
    }

    #[test]
    fn clear_resets_clip_stack() {
        let mut list = DrawList::new();
        list.push_clip(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        list.clear();
        assert_eq!(list.current_clip(), None);
        assert!(list.is_empty());
    }
}
