use glowdeck_engine::coords::Vec2;

/// Min/max box a widget may occupy, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    pub fn tight(size: Vec2) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    pub fn loose(max: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max,
        }
    }

    pub fn clamp(&self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.clamp(self.min.x, self.max.x),
            size.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Loosens the minimum and shrinks the maximum by `amount` per axis,
    /// never below zero. Used when descending into padded children.
    pub fn deflate(&self, amount: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(
                (self.max.x - amount.x).max(0.0),
                (self.max.y - amount.y).max(0.0),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_respects_both_bounds() {
        let c = Constraints {
            min: Vec2::new(10.0, 10.0),
            max: Vec2::new(100.0, 50.0),
        };
        assert_eq!(c.clamp(Vec2::new(5.0, 200.0)), Vec2::new(10.0, 50.0));
        assert_eq!(c.clamp(Vec2::new(60.0, 30.0)), Vec2::new(60.0, 30.0));
    }

    #[test]
    fn deflate_never_goes_negative() {
        let c = Constraints::loose(Vec2::new(10.0, 10.0));
        let d = c.deflate(Vec2::new(20.0, 4.0));
        assert_eq!(d.max, Vec2::new(0.0, 6.0));
    }
}
