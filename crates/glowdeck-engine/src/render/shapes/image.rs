use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, ImageId};

use super::common::{
    ClipTracker, QUAD_INDICES, QUAD_VERTICES, QuadVertex, ViewportUniform, clip_to_scissor,
    premul_alpha_blend, viewport_ubo_min_binding_size,
};

struct StoredImage {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    bind_group: Option<wgpu::BindGroup>,
    width: u32,
    height: u32,
}

/// Renderer for `DrawCmd::Image`.
///
/// Owns the uploaded RGBA textures. Callers upload straight-alpha sRGB pixels
/// once and reference them by [`ImageId`]; the fragment shader premultiplies
/// at sample time. Images draw one quad each, so this is sized for a handful
/// of previews rather than a sprite system.
#[derive(Default)]
pub struct ImageRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    images: HashMap<ImageId, StoredImage>,
    next_id: u64,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl ImageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads straight-alpha RGBA8 pixels (sRGB) and returns a handle.
    /// `pixels.len()` must equal `width * height * 4`.
    pub fn upload(
        &mut self,
        ctx: &RenderCtx<'_>,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> ImageId {
        debug_assert_eq!(pixels.len() as u64, width as u64 * height as u64 * 4);

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glowdeck image"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let id = ImageId(self.next_id);
        self.next_id += 1;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.images.insert(
            id,
            StoredImage {
                _texture: texture,
                view,
                bind_group: None,
                width,
                height,
            },
        );
        id
    }

    pub fn remove(&mut self, id: ImageId) {
        self.images.remove(&id);
    }

    /// Pixel dimensions of an uploaded image.
    pub fn size(&self, id: ImageId) -> Option<(u32, u32)> {
        self.images.get(&id).map(|img| (img.width, img.height))
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_viewport_ubo(ctx);

        let mut draws: Vec<(ImageInstance, ImageId, Option<Rect>)> = Vec::new();
        let mut clip = ClipTracker::default();

        for cmd in draw_list.cmds() {
            if clip.apply(cmd) {
                continue;
            }
            let DrawCmd::Image(shape) = cmd else {
                continue;
            };
            if shape.rect.is_empty() {
                continue;
            }
            if !self.images.contains_key(&shape.image) {
                log::warn!("draw of unknown {:?}, skipping", shape.image);
                continue;
            }
            let r = shape.rect;
            draws.push((
                ImageInstance {
                    dst_min: [r.min().x, r.min().y],
                    dst_max: [r.max().x, r.max().y],
                    tint: shape.tint.to_array(),
                },
                shape.image,
                clip.current(),
            ));
        }

        if draws.is_empty() {
            return;
        }

        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, draws.len());
        for (_, id, _) in &draws {
            self.ensure_image_bind_group(ctx, *id);
        }

        let Some(instance_vbo) = self.instance_vbo.as_ref() else {
            return;
        };
        let raw: Vec<ImageInstance> = draws.iter().map(|(inst, _, _)| *inst).collect();
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&raw));

        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else {
            return;
        };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else {
            return;
        };

        let mut rpass = target
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("glowdeck image pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
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
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        // One draw per image; bind groups differ per texture.
        for (i, (_, id, draw_clip)) in draws.iter().enumerate() {
            let Some(bind_group) = self.images.get(id).and_then(|img| img.bind_group.as_ref())
            else {
                continue;
            };
            let Some((sx, sy, sw, sh)) =
                clip_to_scissor(*draw_clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(0..6, 0, i as u32..i as u32 + 1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("glowdeck image shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/image.wgsl").into()),
            });

        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("glowdeck image bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(viewport_ubo_min_binding_size()),
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
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("glowdeck image pipeline layout"),
                bind_group_layouts: &[&bgl],
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("glowdeck image pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[QuadVertex::layout(), ImageInstance::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(premul_alpha_blend()),
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
            });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.viewport_ubo = None;
        // Bind groups reference the old layout; rebuild them lazily.
        for img in self.images.values_mut() {
            img.bind_group = None;
        }
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glowdeck image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_viewport_ubo(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_ubo.is_some() {
            return;
        }
        self.viewport_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glowdeck image viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        // UBO changed identity; per-image bind groups must be rebuilt.
        for img in self.images.values_mut() {
            img.bind_group = None;
        }
    }

    fn ensure_image_bind_group(&mut self, ctx: &RenderCtx<'_>, id: ImageId) {
        let Some(bgl) = self.bind_group_layout.as_ref() else {
            return;
        };
        let Some(ubo) = self.viewport_ubo.as_ref() else {
            return;
        };
        let Some(sampler) = self.sampler.as_ref() else {
            return;
        };
        let Some(img) = self.images.get_mut(&id) else {
            return;
        };
        if img.bind_group.is_some() {
            return;
        }

        img.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glowdeck image bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&img.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }
        self.quad_vbo = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("glowdeck image quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.quad_ibo = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("glowdeck image quad ibo"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else {
            return;
        };
        let logical = ctx.logical_size();
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [logical.x.max(1.0), logical.y.max(1.0)],
                _pad: [0.0; 2],
            }),
        );
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(16);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glowdeck image instance vbo"),
            size: (new_cap * std::mem::size_of::<ImageInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

/// Instance data layout (32 bytes):
///
///  offset  0  dst_min  [f32; 2]  loc 1
///  offset  8  dst_max  [f32; 2]  loc 2
///  offset 16  tint     [f32; 4]  loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ImageInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    tint: [f32; 4],
}

impl ImageInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
