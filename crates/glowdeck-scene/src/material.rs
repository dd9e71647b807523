/// Surface description consumed by the forward pass.
///
/// Colors are linear RGBA. `Standard` is the lit Blinn-Phong-style surface
/// with an emissive term feeding the bloom chain; `Unlit` bypasses lighting
/// entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Standard {
        base_color: [f32; 4],
        metallic: f32,
        roughness: f32,
        emissive: [f32; 3],
    },
    Unlit {
        color: [f32; 4],
    },
}

impl Material {
    pub fn standard_default() -> Self {
        Material::Standard {
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.0; 3],
        }
    }
}
