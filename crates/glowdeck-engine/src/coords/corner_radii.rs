/// Per-corner radii for rounded rectangles, in logical pixels.
///
/// Order matches the shader instance layout: top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(r: f32) -> Self {
        Self {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }

    /// Caps every radius so opposite corners cannot overlap inside a
    /// `w` x `h` rect.
    pub fn clamped_to(self, w: f32, h: f32) -> Self {
        let cap = (w.min(h) * 0.5).max(0.0);
        Self {
            top_left: self.top_left.clamp(0.0, cap),
            top_right: self.top_right.clamp(0.0, cap),
            bottom_right: self.bottom_right.clamp(0.0, cap),
            bottom_left: self.bottom_left.clamp(0.0, cap),
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

impl From<f32> for CornerRadii {
    fn from(r: f32) -> Self {
        Self::uniform(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_caps_at_half_min_side() {
        let r = CornerRadii::uniform(40.0).clamped_to(100.0, 30.0);
        assert_eq!(r, CornerRadii::uniform(15.0));
    }

    #[test]
    fn clamp_ignores_small_radii() {
        let r = CornerRadii::uniform(4.0).clamped_to(100.0, 30.0);
        assert_eq!(r, CornerRadii::uniform(4.0));
    }
}
