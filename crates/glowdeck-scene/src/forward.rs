use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::camera::CameraSnapshot;
use crate::graph::SceneGraph;
use crate::lights::{LightRig, LightsUniform};
use crate::loader::LoadedScene;
use crate::material::Material;
use crate::mesh::Vertex;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Dynamic-offset stride for per-object uniforms. Matches the WebGPU
/// guaranteed minimum alignment.
const OBJECT_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniform {
    view_proj: [[f32; 4]; 4],
    /// xyz eye position, w unused.
    eye: [f32; 4],
    lights: LightsUniform,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    base_color: [f32; 4],
    /// x metallic, y roughness, z unlit flag.
    params: [f32; 4],
    emissive: [f32; 4],
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

/// Lit forward pass into the HDR target: Blinn-Phong with two point
/// lights, ambient, emissive, and distance fog.
pub struct ForwardRenderer {
    pipeline: Option<wgpu::RenderPipeline>,

    frame_layout: Option<wgpu::BindGroupLayout>,
    frame_ubo: Option<wgpu::Buffer>,
    frame_bind: Option<wgpu::BindGroup>,

    object_layout: Option<wgpu::BindGroupLayout>,
    object_ubo: Option<wgpu::Buffer>,
    object_bind: Option<wgpu::BindGroup>,
    object_capacity: u64,

    meshes: Vec<GpuMesh>,
}

impl ForwardRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: None,
            frame_layout: None,
            frame_ubo: None,
            frame_bind: None,
            object_layout: None,
            object_ubo: None,
            object_bind: None,
            object_capacity: 0,
            meshes: Vec::new(),
        }
    }

    /// Uploads every mesh of a freshly loaded scene, replacing whatever was
    /// there before. Buffer order matches `LoadedScene::meshes` so node mesh
    /// indices stay valid.
    pub fn upload_scene(&mut self, device: &wgpu::Device, scene: &LoadedScene) {
        use wgpu::util::DeviceExt;

        self.meshes = scene
            .meshes
            .iter()
            .map(|mesh| GpuMesh {
                vbo: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("glowdeck mesh vbo"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                ibo: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("glowdeck mesh ibo"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                index_count: mesh.indices.len() as u32,
            })
            .collect();
    }

    /// Records the forward pass. Clears color to the fog color and depth to
    /// the far plane, then draws every node that references a mesh.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        hdr_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        graph: &SceneGraph,
        materials: &[Material],
        camera: &CameraSnapshot,
        lights: &LightRig,
    ) {
        self.ensure_pipeline(device);

        // Collect draws before opening the pass so the uniform buffer can be
        // grown first.
        let mut draws: Vec<(usize, ObjectUniform)> = Vec::new();
        for id in graph.iter_ids() {
            let node = graph.node(id);
            let Some(mesh_index) = node.mesh else { continue };
            if mesh_index >= self.meshes.len() {
                continue;
            }
            let material = node
                .material
                .and_then(|i| materials.get(i))
                .cloned()
                .unwrap_or_else(Material::standard_default);
            let model = graph.world_transform(id);
            draws.push((mesh_index, object_uniform(model, &material)));
        }

        self.ensure_frame_resources(device);
        self.ensure_object_capacity(device, draws.len().max(1) as u64);

        if let Some(ubo) = self.frame_ubo.as_ref() {
            let frame = FrameUniform {
                view_proj: camera.view_proj.to_cols_array_2d(),
                eye: [camera.eye.x, camera.eye.y, camera.eye.z, 0.0],
                lights: lights.to_uniform(),
            };
            queue.write_buffer(ubo, 0, bytemuck::bytes_of(&frame));
        }
        if let Some(ubo) = self.object_ubo.as_ref() {
            for (i, (_, object)) in draws.iter().enumerate() {
                queue.write_buffer(ubo, i as u64 * OBJECT_STRIDE, bytemuck::bytes_of(object));
            }
        }

        let fog = lights.fog_color;
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glowdeck forward pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: hdr_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: fog[0] as f64,
                        g: fog[1] as f64,
                        b: fog[2] as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let (Some(pipeline), Some(frame_bind), Some(object_bind)) = (
            self.pipeline.as_ref(),
            self.frame_bind.as_ref(),
            self.object_bind.as_ref(),
        ) else {
            return;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, frame_bind, &[]);
        for (i, (mesh_index, _)) in draws.iter().enumerate() {
            let mesh = &self.meshes[*mesh_index];
            let offset = (i as u64 * OBJECT_STRIDE) as u32;
            rpass.set_bind_group(1, object_bind, &[offset]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device) {
        if self.pipeline.is_some() {
            return;
        }

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glowdeck forward frame bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<FrameUniform>() as u64
                    ),
                },
                count: None,
            }],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glowdeck forward object bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ObjectUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glowdeck forward shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/forward.wgsl").into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glowdeck forward pipeline layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            immediate_size: 0,
        });

        self.pipeline = Some(
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("glowdeck forward pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: HDR_FORMAT,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            }),
        );

        self.frame_layout = Some(frame_layout);
        self.object_layout = Some(object_layout);
    }

    fn ensure_frame_resources(&mut self, device: &wgpu::Device) {
        if self.frame_bind.is_some() {
            return;
        }
        let Some(layout) = self.frame_layout.as_ref() else {
            return;
        };
        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glowdeck forward frame ubo"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.frame_bind = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glowdeck forward frame bind"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        }));
        self.frame_ubo = Some(ubo);
    }

    fn ensure_object_capacity(&mut self, device: &wgpu::Device, count: u64) {
        if self.object_capacity >= count && self.object_bind.is_some() {
            return;
        }
        let Some(layout) = self.object_layout.as_ref() else {
            return;
        };
        let capacity = count.next_power_of_two().max(16);
        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glowdeck forward object ubo"),
            size: capacity * OBJECT_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.object_bind = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glowdeck forward object bind"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
        }));
        self.object_ubo = Some(ubo);
        self.object_capacity = capacity;
    }
}

impl Default for ForwardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn object_uniform(model: Mat4, material: &Material) -> ObjectUniform {
    match material {
        Material::Standard {
            base_color,
            metallic,
            roughness,
            emissive,
        } => ObjectUniform {
            model: model.to_cols_array_2d(),
            base_color: *base_color,
            params: [*metallic, *roughness, 0.0, 0.0],
            emissive: [emissive[0], emissive[1], emissive[2], 0.0],
        },
        Material::Unlit { color } => ObjectUniform {
            model: model.to_cols_array_2d(),
            base_color: *color,
            params: [0.0, 0.0, 1.0, 0.0],
            emissive: [0.0; 4],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn unlit_material_sets_the_flag() {
        let u = object_uniform(Mat4::IDENTITY, &Material::Unlit { color: [1.0; 4] });
        assert_eq!(u.params[2], 1.0);
        assert_eq!(u.emissive, [0.0; 4]);
    }

    #[test]
    fn standard_material_carries_pbr_params() {
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let u = object_uniform(
            model,
            &Material::Standard {
                base_color: [0.5, 0.5, 0.5, 1.0],
                metallic: 0.6,
                roughness: 0.2,
                emissive: [0.1, 0.2, 0.3],
            },
        );
        assert_eq!(u.params[0], 0.6);
        assert_eq!(u.params[1], 0.2);
        assert_eq!(u.params[2], 0.0);
        assert_eq!(u.model[3][0], 1.0);
        assert_eq!(u.model[3][1], 2.0);
    }

    #[test]
    fn uniform_sizes_fit_the_stride() {
        assert!(std::mem::size_of::<ObjectUniform>() as u64 <= OBJECT_STRIDE);
        assert_eq!(std::mem::size_of::<FrameUniform>(), 192);
    }
}
