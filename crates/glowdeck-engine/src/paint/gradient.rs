use super::Color;
use crate::coords::Vec2;

/// Two-stop linear gradient.
///
/// `start` and `end` are in unit space relative to the shape's bounds:
/// (0,0) is the top-left corner, (1,1) the bottom-right. The shader projects
/// each fragment onto the start->end axis and mixes the premultiplied stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub from: Color,
    pub to: Color,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, from: Color, to: Color) -> Self {
        Self { start, end, from, to }
    }

    /// Left-to-right gradient across the shape.
    pub fn horizontal(from: Color, to: Color) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(1.0, 0.0), from, to)
    }

    /// Top-to-bottom gradient across the shape.
    pub fn vertical(from: Color, to: Color) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(0.0, 1.0), from, to)
    }
}
