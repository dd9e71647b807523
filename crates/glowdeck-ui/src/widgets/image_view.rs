use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::scene::{ImageId, ImageShape};

use crate::constraints::Constraints;
use crate::painter::Painter;
use crate::widget::{LayoutCtx, Widget};

/// Decodes PNG/JPEG bytes into straight-alpha RGBA8 pixels ready for the
/// image renderer.
pub fn decode_rgba(bytes: &[u8]) -> Result<(Vec<u8>, u32, u32), image::ImageError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = decoded.dimensions();
    Ok((decoded.into_raw(), w, h))
}

/// Shows an uploaded image, letterboxed to preserve its aspect ratio.
/// Empty until an image is set; measures to zero height while empty.
pub struct ImageView {
    image: Option<(ImageId, u32, u32)>,
    max_height: f32,
}

impl ImageView {
    pub fn new(max_height: f32) -> Self {
        Self {
            image: None,
            max_height,
        }
    }

    pub fn set_image(&mut self, id: ImageId, width: u32, height: u32) {
        self.image = Some((id, width, height));
    }

    pub fn clear(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<ImageId> {
        self.image.map(|(id, _, _)| id)
    }

    fn fitted(&self, bounds: Rect) -> Option<Rect> {
        let (_, w, h) = self.image?;
        if w == 0 || h == 0 || bounds.is_empty() {
            return None;
        }
        let scale = (bounds.width() / w as f32).min(bounds.height() / h as f32);
        let size = Vec2::new(w as f32 * scale, h as f32 * scale);
        let origin = bounds.origin + (bounds.size - size) * 0.5;
        Some(Rect::new(origin, size))
    }
}

impl Widget for ImageView {
    fn measure(&mut self, constraints: Constraints, _ctx: &LayoutCtx<'_>) -> Vec2 {
        match self.image {
            Some((_, w, h)) => {
                let width = constraints.max.x;
                let height = (h as f32 / w as f32 * width).min(self.max_height);
                constraints.clamp(Vec2::new(width, height))
            }
            None => constraints.clamp(Vec2::ZERO),
        }
    }

    fn paint(&mut self, painter: &mut Painter<'_>, bounds: Rect) {
        let Some((id, _, _)) = self.image else { return };
        if let Some(rect) = self.fitted(bounds) {
            painter.draw.image(ImageShape::new(rect, id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_preserves_aspect_and_centers() {
        let mut view = ImageView::new(300.0);
        view.set_image(ImageId(1), 100, 50);
        let rect = view
            .fitted(Rect::from_xywh(0.0, 0.0, 200.0, 200.0))
            .unwrap();
        assert_eq!(rect.size, Vec2::new(200.0, 100.0));
        assert_eq!(rect.origin, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn empty_view_measures_flat() {
        let fonts = glowdeck_engine::text::FontSystem::new();
        let ctx = LayoutCtx {
            fonts: &fonts,
            scale: 1.0,
        };
        let mut view = ImageView::new(300.0);
        let size = view.measure(
            Constraints::loose(Vec2::new(200.0, f32::INFINITY)),
            &ctx,
        );
        assert_eq!(size.y, 0.0);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_rgba(&[0, 1, 2, 3]).is_err());
    }
}
