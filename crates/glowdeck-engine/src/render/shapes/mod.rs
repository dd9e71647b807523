//! One renderer per draw-command kind.

mod circle;
mod common;
mod image;
mod rounded_rect;
mod text;

pub use circle::CircleRenderer;
pub use image::ImageRenderer;
pub use rounded_rect::RoundedRectRenderer;
pub use text::TextRenderer;
