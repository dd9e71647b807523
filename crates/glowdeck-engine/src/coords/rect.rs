use super::Vec2;

/// Axis-aligned rectangle in logical pixels, stored as origin + size.
///
/// A rect with zero or negative width/height is "empty": it contains no
/// points and intersects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const ZERO: Self = Self {
        origin: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    pub fn min(&self) -> Vec2 {
        self.origin
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        !self.is_empty()
            && p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < self.origin.x + self.size.x
            && p.y < self.origin.y + self.size.y
    }

    /// Overlap of two rects; `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let lo = self.min().max(other.min());
        let hi = self.max().min(other.max());
        let size = hi - lo;
        if size.x > 0.0 && size.y > 0.0 {
            Some(Rect::new(lo, size))
        } else {
            None
        }
    }

    /// Shrinks the rect by `amount` on every side. Collapses to a point at
    /// the center rather than inverting.
    pub fn inset(&self, amount: f32) -> Rect {
        let shrink = (amount * 2.0).min(self.size.x).min(self.size.y);
        let half = shrink * 0.5;
        Rect::new(
            self.origin + Vec2::splat(half),
            self.size - Vec2::splat(shrink),
        )
    }

    pub fn translate(&self, delta: Vec2) -> Rect {
        Rect::new(self.origin + delta, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_excludes_far_edges() {
        let r = Rect::from_xywh(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(29.9, 29.9)));
        assert!(!r.contains(Vec2::new(30.0, 30.0)));
        assert!(!r.contains(Vec2::new(9.9, 15.0)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::from_xywh(5.0, 5.0, 0.0, 10.0);
        assert!(!r.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn intersect_overlapping() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::from_xywh(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_touching_edges_is_none() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn inset_never_inverts() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 4.0);
        let shrunk = r.inset(5.0);
        assert_eq!(shrunk.size, Vec2::new(6.0, 0.0));
        assert_eq!(shrunk.center(), r.center());
    }
}
