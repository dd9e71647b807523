/// Linear-space RGBA color with premultiplied alpha.
///
/// All blending in the 2D renderers assumes premultiplication, so the raw
/// components are not exposed for mutation; construct through
/// [`Color::from_straight`] or one of the sRGB helpers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// From straight (non-premultiplied) linear RGBA.
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r * a,
            g: g * a,
            b: b * a,
            a,
        }
    }

    /// From 8-bit sRGB with full alpha.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            1.0,
        )
    }

    /// From a `0xRRGGBB` sRGB hex value with full alpha.
    pub fn from_hex(rgb: u32) -> Self {
        Self::from_srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Returns the same color with alpha scaled by `factor`.
    pub fn with_alpha(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
            a: self.a * f,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.a
    }

    /// Premultiplied components in shader order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_components_are_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c.to_array(), [0.5, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn srgb_endpoints_map_to_linear_endpoints() {
        assert_eq!(Color::from_srgb_u8(0, 0, 0).to_array(), [0.0, 0.0, 0.0, 1.0]);
        let w = Color::from_srgb_u8(255, 255, 255).to_array();
        assert!((w[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hex_matches_components() {
        assert_eq!(Color::from_hex(0x11F4FF), Color::from_srgb_u8(0x11, 0xF4, 0xFF));
    }

    #[test]
    fn with_alpha_scales_everything() {
        let c = Color::WHITE.with_alpha(0.25);
        assert_eq!(c.to_array(), [0.25, 0.25, 0.25, 0.25]);
    }
}
