/// Number of blur mip levels the chain uses at full size.
pub const MAX_LEVELS: usize = 5;

/// Gaussian kernel radius per level, widening as resolution drops.
pub const KERNEL_RADII: [i32; MAX_LEVELS] = [3, 5, 7, 9, 11];

/// Pure description of the bloom chain's intermediate texture sizes for a
/// given viewport. Computed up front so resizes swap every texture in one
/// step, and testable without a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxPlan {
    /// Half-resolution mip sizes, largest first. Never empty, never zero.
    pub levels: Vec<(u32, u32)>,
}

impl FxPlan {
    pub fn for_viewport(width_px: u32, height_px: u32) -> Self {
        let mut levels = Vec::with_capacity(MAX_LEVELS);
        let mut w = (width_px / 2).max(1);
        let mut h = (height_px / 2).max(1);
        for _ in 0..MAX_LEVELS {
            levels.push((w, h));
            if w == 1 && h == 1 {
                break;
            }
            w = (w / 2).max(1);
            h = (h / 2).max(1);
        }
        Self { levels }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_chain_halves_each_level() {
        let plan = FxPlan::for_viewport(1600, 800);
        assert_eq!(
            plan.levels,
            vec![(800, 400), (400, 200), (200, 100), (100, 50), (50, 25)]
        );
    }

    #[test]
    fn tiny_viewport_clamps_to_one_pixel() {
        let plan = FxPlan::for_viewport(3, 2);
        assert!(!plan.levels.is_empty());
        for &(w, h) in &plan.levels {
            assert!(w >= 1 && h >= 1);
        }
        assert_eq!(*plan.levels.last().unwrap(), (1, 1));
    }

    #[test]
    fn odd_sizes_round_down_but_never_to_zero() {
        let plan = FxPlan::for_viewport(5, 1001);
        assert_eq!(plan.levels[0], (2, 500));
        assert_eq!(plan.levels[1], (1, 250));
    }
}
