use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::CameraSnapshot;
use crate::graph::NodeId;

/// Where the panel lives in the 3D scene: the node whose world transform
/// positions it, and the quad's half extents in that node's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayBinding {
    pub node: NodeId,
    pub half_width: f32,
    pub half_height: f32,
}

impl OverlayBinding {
    /// Quad matching the panel texture's 640x800 aspect at unit height.
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            half_width: 0.4,
            half_height: 0.5,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct OverlayUniform {
    mvp: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct OverlayVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

/// Draws the 2D panel texture as a quad at a scene node's transform.
///
/// The panel texture doubles as a render target for the UI pass and a
/// sampled binding here. The quad is drawn after bloom with no depth test,
/// so the live panel always reads on top of the tonemapped scene.
pub struct OverlayCompositor {
    width: u32,
    height: u32,

    panel: Option<wgpu::Texture>,
    panel_view: Option<wgpu::TextureView>,

    pipeline: Option<wgpu::RenderPipeline>,
    pipeline_format: Option<wgpu::TextureFormat>,
    layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
    ubo: Option<wgpu::Buffer>,
    bind: Option<wgpu::BindGroup>,
    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
}

impl OverlayCompositor {
    pub const PANEL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            panel: None,
            panel_view: None,
            pipeline: None,
            pipeline_format: None,
            layout: None,
            sampler: None,
            ubo: None,
            bind: None,
            vbo: None,
            ibo: None,
        }
    }

    pub fn panel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// View of the panel texture, for the UI render pass to draw into.
    pub fn panel_view(&mut self, device: &wgpu::Device) -> &wgpu::TextureView {
        self.ensure_panel(device);
        self.panel_view
            .as_ref()
            .expect("panel view exists after ensure_panel")
    }

    /// Draws the panel quad into `output_view` under `camera`, placed by
    /// the binding node's world matrix.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        output_format: wgpu::TextureFormat,
        camera: &CameraSnapshot,
        model: Mat4,
        binding: &OverlayBinding,
    ) {
        self.ensure_panel(device);
        self.ensure_pipeline(device, output_format);
        self.ensure_static_buffers(device, binding);

        let (Some(pipeline), Some(bind), Some(ubo), Some(vbo), Some(ibo)) = (
            self.pipeline.as_ref(),
            self.bind.as_ref(),
            self.ubo.as_ref(),
            self.vbo.as_ref(),
            self.ibo.as_ref(),
        ) else {
            return;
        };

        let mvp = camera.view_proj * model;
        queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&OverlayUniform {
                mvp: mvp.to_cols_array_2d(),
            }),
        );

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glowdeck overlay pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..1);
    }

    /// Maps a cursor ray hit on the panel quad to panel pixel coordinates.
    ///
    /// Returns `None` when the ray misses the quad or approaches it
    /// edge-on. `cursor_px` and `viewport_px` are physical pixels.
    pub fn pointer_to_panel(
        &self,
        camera: &CameraSnapshot,
        cursor_px: (f32, f32),
        viewport_px: (f32, f32),
        model: Mat4,
        binding: &OverlayBinding,
    ) -> Option<(f32, f32)> {
        let (origin, dir) = camera.cursor_ray(cursor_px, viewport_px);

        let inv = model.inverse();
        let local_origin = inv.transform_point3(origin);
        let local_dir = inv.transform_vector3(dir);

        // Quad plane is local z = 0.
        if local_dir.z.abs() < 1e-6 {
            return None;
        }
        let t = -local_origin.z / local_dir.z;
        if t <= 0.0 {
            return None;
        }
        let hit: Vec3 = local_origin + local_dir * t;
        if hit.x.abs() > binding.half_width || hit.y.abs() > binding.half_height {
            return None;
        }

        let u = (hit.x / binding.half_width + 1.0) * 0.5;
        let v = (1.0 - hit.y / binding.half_height) * 0.5;
        Some((u * self.width as f32, v * self.height as f32))
    }

    fn ensure_panel(&mut self, device: &wgpu::Device) {
        if self.panel.is_some() {
            return;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glowdeck overlay panel"),
            size: wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::PANEL_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        self.panel_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.panel = Some(texture);
        // The bind group references the old view.
        self.bind = None;
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, output_format: wgpu::TextureFormat) {
        if self.pipeline.is_some() && self.pipeline_format == Some(output_format) {
            return;
        }

        if self.layout.is_none() {
            self.layout = Some(device.create_bind_group_layout(
                &wgpu::BindGroupLayoutDescriptor {
                    label: Some("glowdeck overlay bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(
                                    std::mem::size_of::<OverlayUniform>() as u64,
                                ),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                },
            ));
        }
        let layout = self
            .layout
            .as_ref()
            .expect("overlay layout set above");

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glowdeck overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glowdeck overlay pipeline layout"),
            bind_group_layouts: &[layout],
            immediate_size: 0,
        });

        self.pipeline = Some(
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("glowdeck overlay pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<OverlayVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: output_format,
                        blend: Some(wgpu::BlendState {
                            color: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::One,
                                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                                operation: wgpu::BlendOperation::Add,
                            },
                            alpha: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::One,
                                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                                operation: wgpu::BlendOperation::Add,
                            },
                        }),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            }),
        );
        self.pipeline_format = Some(output_format);
        self.bind = None;
    }

    fn ensure_static_buffers(&mut self, device: &wgpu::Device, binding: &OverlayBinding) {
        use wgpu::util::DeviceExt;

        if self.vbo.is_none() {
            let (hw, hh) = (binding.half_width, binding.half_height);
            let vertices = [
                OverlayVertex {
                    position: [-hw, hh, 0.0],
                    uv: [0.0, 0.0],
                },
                OverlayVertex {
                    position: [hw, hh, 0.0],
                    uv: [1.0, 0.0],
                },
                OverlayVertex {
                    position: [hw, -hh, 0.0],
                    uv: [1.0, 1.0],
                },
                OverlayVertex {
                    position: [-hw, -hh, 0.0],
                    uv: [0.0, 1.0],
                },
            ];
            let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];
            self.vbo = Some(
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("glowdeck overlay vbo"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
            );
            self.ibo = Some(
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("glowdeck overlay ibo"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
            );
        }

        if self.ubo.is_none() {
            self.ubo = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("glowdeck overlay ubo"),
                size: std::mem::size_of::<OverlayUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }

        if self.sampler.is_none() {
            self.sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("glowdeck overlay sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            }));
        }

        if self.bind.is_none() {
            let (Some(layout), Some(ubo), Some(view), Some(sampler)) = (
                self.layout.as_ref(),
                self.ubo.as_ref(),
                self.panel_view.as_ref(),
                self.sampler.as_ref(),
            ) else {
                return;
            };
            self.bind = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("glowdeck overlay bind"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: ubo.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;

    fn facing_setup() -> (CameraSnapshot, Mat4, OverlayBinding, OverlayCompositor) {
        let mut cam = PerspectiveCamera::new(35.0, 0.1, 100.0);
        cam.set_viewport(800, 800);
        let snap = cam.snapshot(Vec3::new(0.0, 1.0, 3.0), Vec3::new(0.0, 1.0, 0.0));
        // Quad facing +z, centered at the orbit target.
        let model = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let binding = OverlayBinding::new(NodeId(0));
        (snap, model, binding, OverlayCompositor::new(640, 800))
    }

    #[test]
    fn center_cursor_hits_panel_center() {
        let (snap, model, binding, compositor) = facing_setup();
        let hit = compositor
            .pointer_to_panel(&snap, (400.0, 400.0), (800.0, 800.0), model, &binding)
            .unwrap();
        assert!((hit.0 - 320.0).abs() < 1.0);
        assert!((hit.1 - 400.0).abs() < 1.0);
    }

    #[test]
    fn cursor_off_quad_misses() {
        let (snap, model, binding, compositor) = facing_setup();
        let hit = compositor.pointer_to_panel(&snap, (5.0, 5.0), (800.0, 800.0), model, &binding);
        assert!(hit.is_none());
    }

    #[test]
    fn ray_behind_camera_misses() {
        let (snap, _, binding, compositor) = facing_setup();
        // Quad behind the eye.
        let model = Mat4::from_translation(Vec3::new(0.0, 1.0, 10.0));
        let hit = compositor.pointer_to_panel(&snap, (400.0, 400.0), (800.0, 800.0), model, &binding);
        assert!(hit.is_none());
    }

    #[test]
    fn upper_left_maps_to_upper_left_pixels() {
        let (snap, model, binding, compositor) = facing_setup();
        let center = compositor
            .pointer_to_panel(&snap, (400.0, 400.0), (800.0, 800.0), model, &binding)
            .unwrap();
        let upper_left = compositor
            .pointer_to_panel(&snap, (360.0, 340.0), (800.0, 800.0), model, &binding)
            .unwrap();
        assert!(upper_left.0 < center.0);
        assert!(upper_left.1 < center.1);
    }
}
