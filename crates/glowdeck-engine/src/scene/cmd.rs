use crate::coords::Rect;

use super::shapes::{CircleShape, ImageShape, RoundedRectShape, TextShape};

/// One entry of the draw stream.
///
/// Clip commands bracket a run of shapes; the renderers translate the
/// effective clip into a scissor rect per draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    RoundedRect(RoundedRectShape),
    Circle(CircleShape),
    Text(TextShape),
    Image(ImageShape),
    PushClip(Rect),
    PopClip,
}
