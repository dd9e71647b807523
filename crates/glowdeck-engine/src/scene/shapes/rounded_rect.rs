use crate::coords::{CornerRadii, Rect};
use crate::paint::{Color, Fill};

/// Stroke around a rounded rect, drawn inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub color: Color,
    pub width: f32,
}

impl Border {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Filled (and optionally stroked) rounded rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectShape {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub fill: Fill,
    pub border: Option<Border>,
}

impl RoundedRectShape {
    pub fn new(rect: Rect, fill: impl Into<Fill>) -> Self {
        Self {
            rect,
            radii: CornerRadii::ZERO,
            fill: fill.into(),
            border: None,
        }
    }

    pub fn with_radii(mut self, radii: impl Into<CornerRadii>) -> Self {
        self.radii = radii.into();
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }
}
