use super::{Rect, Vec2};

/// Target surface extent in physical pixels.
///
/// The 2D shaders position vertices in NDC, so every renderer needs the
/// logical-to-NDC mapping; this is the single source of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
}

impl Viewport {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px: width_px.max(1),
            height_px: height_px.max(1),
        }
    }

    pub fn logical_size(&self, scale_factor: f32) -> Vec2 {
        Vec2::new(
            self.width_px as f32 / scale_factor,
            self.height_px as f32 / scale_factor,
        )
    }

    pub fn aspect(&self) -> f32 {
        self.width_px as f32 / self.height_px as f32
    }
}

/// Converts a logical-pixel clip rect to a physical scissor rect, clamped to
/// the viewport. Returns `None` when nothing survives the clamp.
pub fn logical_clip_to_scissor(
    clip: Rect,
    viewport: Viewport,
    scale_factor: f32,
) -> Option<(u32, u32, u32, u32)> {
    let lo = clip.min() * scale_factor;
    let hi = clip.max() * scale_factor;

    let x0 = (lo.x.floor().max(0.0) as u32).min(viewport.width_px);
    let y0 = (lo.y.floor().max(0.0) as u32).min(viewport.height_px);
    let x1 = (hi.x.ceil().max(0.0) as u32).min(viewport.width_px);
    let y1 = (hi.y.ceil().max(0.0) as u32).min(viewport.height_px);

    if x1 > x0 && y1 > y0 {
        Some((x0, y0, x1 - x0, y1 - y0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extent_is_clamped_to_one() {
        let v = Viewport::new(0, 0);
        assert_eq!((v.width_px, v.height_px), (1, 1));
    }

    #[test]
    fn scissor_scales_and_clamps() {
        let v = Viewport::new(200, 100);
        let clip = Rect::from_xywh(-10.0, 10.0, 1000.0, 20.0);
        assert_eq!(
            logical_clip_to_scissor(clip, v, 2.0),
            Some((0, 20, 200, 40))
        );
    }

    #[test]
    fn scissor_is_reachable_through_the_module_root() {
        // Renderers import this through `crate::coords`, not the submodule.
        let v = Viewport::new(100, 100);
        let clip = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            crate::coords::logical_clip_to_scissor(clip, v, 1.0),
            Some((0, 0, 10, 10))
        );
    }

    #[test]
    fn scissor_outside_viewport_is_none() {
        let v = Viewport::new(200, 100);
        let clip = Rect::from_xywh(300.0, 0.0, 50.0, 50.0);
        assert_eq!(logical_clip_to_scissor(clip, v, 1.0), None);
    }
}
