//! Logical-pixel geometry used by the 2D draw stream.
//!
//! Everything in here is in logical pixels unless a name says otherwise;
//! conversion to physical pixels happens at the renderer boundary via
//! [`Viewport`].

mod corner_radii;
mod rect;
mod vec2;
mod viewport;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::{Viewport, logical_clip_to_scissor};
