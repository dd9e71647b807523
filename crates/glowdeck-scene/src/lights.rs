use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

/// Fixed light rig for the tablet scene: a deep blue ambient plus a cyan
/// key light and a blue fill, with height fog closing off the distance.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub points: [PointLight; 2],
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
}

impl LightRig {
    pub fn tablet_default() -> Self {
        Self {
            ambient_color: srgb_hex(0x0C1640),
            ambient_intensity: 1.2,
            points: [
                PointLight {
                    position: Vec3::new(2.0, 3.0, 2.0),
                    color: srgb_hex(0x11F4FF),
                    intensity: 3.0,
                    range: 10.0,
                },
                PointLight {
                    position: Vec3::new(-2.0, 2.0, -2.0),
                    color: srgb_hex(0x0040FF),
                    intensity: 2.0,
                    range: 10.0,
                },
            ],
            fog_color: srgb_hex(0x06080E),
            fog_near: 10.0,
            fog_far: 50.0,
        }
    }

    pub(crate) fn to_uniform(&self) -> LightsUniform {
        let p = |l: &PointLight| PointLightUniform {
            position: [l.position.x, l.position.y, l.position.z, l.range],
            color: [
                l.color[0] * l.intensity,
                l.color[1] * l.intensity,
                l.color[2] * l.intensity,
                0.0,
            ],
        };
        LightsUniform {
            ambient: [
                self.ambient_color[0] * self.ambient_intensity,
                self.ambient_color[1] * self.ambient_intensity,
                self.ambient_color[2] * self.ambient_intensity,
                0.0,
            ],
            points: [p(&self.points[0]), p(&self.points[1])],
            fog_color: [self.fog_color[0], self.fog_color[1], self.fog_color[2], 0.0],
            fog_range: [self.fog_near, self.fog_far, 0.0, 0.0],
        }
    }
}

/// `0xRRGGBB` sRGB hex to linear RGB.
fn srgb_hex(rgb: u32) -> [f32; 3] {
    let channel = |v: u32| {
        let c = (v & 0xFF) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(rgb >> 16), channel(rgb >> 8), channel(rgb)]
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct PointLightUniform {
    /// xyz position, w range.
    pub position: [f32; 4],
    /// Pre-scaled by intensity; w unused.
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct LightsUniform {
    pub ambient: [f32; 4],
    pub points: [PointLightUniform; 2],
    pub fog_color: [f32; 4],
    /// x near, y far.
    pub fog_range: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_prescales_intensity() {
        let rig = LightRig::tablet_default();
        let u = rig.to_uniform();
        let expected = rig.points[0].color[1] * rig.points[0].intensity;
        assert!((u.points[0].color[1] - expected).abs() < 1e-6);
        assert_eq!(u.points[0].position[3], 10.0);
        assert_eq!(u.fog_range[0], 10.0);
        assert_eq!(u.fog_range[1], 50.0);
    }

    #[test]
    fn hex_black_and_white_are_exact() {
        assert_eq!(srgb_hex(0x000000), [0.0; 3]);
        let w = srgb_hex(0xFFFFFF);
        assert!((w[0] - 1.0).abs() < 1e-6 && (w[2] - 1.0).abs() < 1e-6);
    }
}
