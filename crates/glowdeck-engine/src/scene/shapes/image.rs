use crate::coords::Rect;
use crate::paint::Color;

/// Handle to an RGBA image previously uploaded to the image renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

/// Textured quad showing an uploaded image, stretched to `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageShape {
    pub rect: Rect,
    pub image: ImageId,
    pub tint: Color,
}

impl ImageShape {
    pub fn new(rect: Rect, image: ImageId) -> Self {
        Self {
            rect,
            image,
            tint: Color::WHITE,
        }
    }
}
