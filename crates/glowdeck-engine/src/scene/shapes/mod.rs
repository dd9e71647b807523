//! Shape payloads carried by draw commands.

mod circle;
mod image;
mod rounded_rect;
mod text;

pub use circle::CircleShape;
pub use image::{ImageId, ImageShape};
pub use rounded_rect::{Border, RoundedRectShape};
pub use text::TextShape;
