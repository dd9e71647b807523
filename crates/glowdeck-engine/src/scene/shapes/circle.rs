use crate::coords::Vec2;
use crate::paint::{Color, Fill};

/// Filled circle with an optional ring stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Fill,
    pub ring: Option<(Color, f32)>,
}

impl CircleShape {
    pub fn new(center: Vec2, radius: f32, fill: impl Into<Fill>) -> Self {
        Self {
            center,
            radius,
            fill: fill.into(),
            ring: None,
        }
    }

    pub fn with_ring(mut self, color: Color, width: f32) -> Self {
        self.ring = Some((color, width));
        self
    }
}
