//! Retained draw stream for 2D content.
//!
//! Widgets record shapes into a [`DrawList`]; the renderers in
//! [`crate::render`] consume the list in insertion order. There is no
//! z-sorting: later commands draw over earlier ones, which matches how the
//! panel lays itself out.

mod cmd;
mod list;
pub mod shapes;

pub use cmd::DrawCmd;
pub use list::DrawList;
pub use shapes::{Border, CircleShape, ImageId, ImageShape, RoundedRectShape, TextShape};
