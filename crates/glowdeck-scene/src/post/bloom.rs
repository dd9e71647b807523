use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::plan::{FxPlan, KERNEL_RADII, MAX_LEVELS};

const CHAIN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Bloom tuning, applied when the chain is (re)built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            strength: 0.8,
            radius: 0.4,
            threshold: 0.85,
        }
    }
}

/// Per-level falloff factors; `radius` shifts weight toward the wider
/// levels.
const LEVEL_FACTORS: [f32; MAX_LEVELS] = [1.0, 0.8, 0.6, 0.4, 0.2];

struct Level {
    _ping: wgpu::Texture,
    _pong: wgpu::Texture,
    ping_view: wgpu::TextureView,
    pong_view: wgpu::TextureView,
}

/// Threshold-extract, separable-blur, additive-combine bloom over a chain
/// of half-resolution HDR mips, ending in a tonemap to the surface.
///
/// All bind groups are built in [`BloomChain::rebuild`]; the per-frame
/// [`BloomChain::render`] only records passes.
pub struct BloomChain {
    settings: BloomSettings,

    extract_pipeline: Option<wgpu::RenderPipeline>,
    blur_pipeline: Option<wgpu::RenderPipeline>,
    combine_pipeline: Option<wgpu::RenderPipeline>,
    combine_format: Option<wgpu::TextureFormat>,

    pass_layout: Option<wgpu::BindGroupLayout>,
    combine_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    levels: Vec<Level>,
    extract_bind: Option<wgpu::BindGroup>,
    /// Two blur bind groups per level: horizontal then vertical.
    blur_binds: Vec<wgpu::BindGroup>,
    combine_bind: Option<wgpu::BindGroup>,
}

impl BloomChain {
    pub fn new(settings: BloomSettings) -> Self {
        Self {
            settings,
            extract_pipeline: None,
            blur_pipeline: None,
            combine_pipeline: None,
            combine_format: None,
            pass_layout: None,
            combine_layout: None,
            sampler: None,
            levels: Vec::new(),
            extract_bind: None,
            blur_binds: Vec::new(),
            combine_bind: None,
        }
    }

    pub fn settings(&self) -> BloomSettings {
        self.settings
    }

    /// Recreates every chain texture and bind group for a new plan, scene
    /// view, or output format. Called on startup and on resize.
    pub fn rebuild(
        &mut self,
        device: &wgpu::Device,
        plan: &FxPlan,
        scene_hdr_view: &wgpu::TextureView,
        output_format: wgpu::TextureFormat,
    ) {
        self.ensure_pipelines(device, output_format);

        let Some(pass_layout) = self.pass_layout.as_ref() else {
            return;
        };
        let Some(combine_layout) = self.combine_layout.as_ref() else {
            return;
        };
        let Some(sampler) = self.sampler.as_ref() else {
            return;
        };

        self.levels = plan
            .levels
            .iter()
            .map(|&(w, h)| {
                let make = |label: &str| {
                    device.create_texture(&wgpu::TextureDescriptor {
                        label: Some(label),
                        size: wgpu::Extent3d {
                            width: w,
                            height: h,
                            depth_or_array_layers: 1,
                        },
                        mip_level_count: 1,
                        sample_count: 1,
                        dimension: wgpu::TextureDimension::D2,
                        format: CHAIN_FORMAT,
                        usage: wgpu::TextureUsages::TEXTURE_BINDING
                            | wgpu::TextureUsages::RENDER_ATTACHMENT,
                        view_formats: &[],
                    })
                };
                let ping = make("glowdeck bloom ping");
                let pong = make("glowdeck bloom pong");
                let ping_view = ping.create_view(&wgpu::TextureViewDescriptor::default());
                let pong_view = pong.create_view(&wgpu::TextureViewDescriptor::default());
                Level {
                    _ping: ping,
                    _pong: pong,
                    ping_view,
                    pong_view,
                }
            })
            .collect();

        // Extract: scene -> level 0 ping.
        let extract_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glowdeck bloom extract ubo"),
            contents: bytemuck::bytes_of(&ExtractUniform {
                threshold: self.settings.threshold,
                knee: 0.1,
                _pad: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        self.extract_bind = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glowdeck bloom extract bind"),
            layout: pass_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_hdr_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: extract_ubo.as_entire_binding(),
                },
            ],
        }));

        // Blur binds. Horizontal reads the previous level's result (or this
        // level's ping for level 0); vertical reads this level's pong.
        self.blur_binds.clear();
        for (i, &(w, h)) in plan.levels.iter().enumerate() {
            let radius = KERNEL_RADII[i.min(KERNEL_RADII.len() - 1)];
            let sigma = radius as f32 / 2.0;

            let h_src = if i == 0 {
                &self.levels[0].ping_view
            } else {
                &self.levels[i - 1].ping_view
            };
            let h_ubo = blur_uniform(device, 1.0 / w as f32, 0.0, radius, sigma);
            self.blur_binds.push(pass_bind(
                device,
                pass_layout,
                sampler,
                h_src,
                &h_ubo,
                "glowdeck bloom blur h bind",
            ));

            let v_ubo = blur_uniform(device, 0.0, 1.0 / h as f32, radius, sigma);
            self.blur_binds.push(pass_bind(
                device,
                pass_layout,
                sampler,
                &self.levels[i].pong_view,
                &v_ubo,
                "glowdeck bloom blur v bind",
            ));
        }

        // Combine: scene + every level ping -> output. Missing levels repeat
        // the smallest one with zero weight.
        let mut weights = [[0.0f32; 4]; 2];
        for i in 0..self.levels.len().min(MAX_LEVELS) {
            let factor = LEVEL_FACTORS[i];
            let mixed = factor + (1.2 - 2.0 * factor) * self.settings.radius;
            weights[i / 4][i % 4] = self.settings.strength * mixed;
        }
        let combine_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glowdeck bloom combine ubo"),
            contents: bytemuck::bytes_of(&CombineUniform { weights }),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let level_view = |i: usize| {
            let idx = i.min(self.levels.len() - 1);
            &self.levels[idx].ping_view
        };
        self.combine_bind = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glowdeck bloom combine bind"),
            layout: combine_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_hdr_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: combine_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(level_view(0)),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(level_view(1)),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::TextureView(level_view(2)),
                },
                wgpu::BindGroupEntry {
                    binding: 6,
                    resource: wgpu::BindingResource::TextureView(level_view(3)),
                },
                wgpu::BindGroupEntry {
                    binding: 7,
                    resource: wgpu::BindingResource::TextureView(level_view(4)),
                },
            ],
        }));
    }

    /// Records the full chain: extract, per-level blur, combine into
    /// `output_view`.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, output_view: &wgpu::TextureView) {
        let (Some(extract_pipeline), Some(blur_pipeline), Some(combine_pipeline)) = (
            self.extract_pipeline.as_ref(),
            self.blur_pipeline.as_ref(),
            self.combine_pipeline.as_ref(),
        ) else {
            return;
        };
        let (Some(extract_bind), Some(combine_bind)) =
            (self.extract_bind.as_ref(), self.combine_bind.as_ref())
        else {
            return;
        };
        if self.levels.is_empty() {
            return;
        }

        fullscreen_pass(
            encoder,
            "glowdeck bloom extract",
            &self.levels[0].ping_view,
            extract_pipeline,
            extract_bind,
        );

        for (i, level) in self.levels.iter().enumerate() {
            fullscreen_pass(
                encoder,
                "glowdeck bloom blur h",
                &level.pong_view,
                blur_pipeline,
                &self.blur_binds[i * 2],
            );
            fullscreen_pass(
                encoder,
                "glowdeck bloom blur v",
                &level.ping_view,
                blur_pipeline,
                &self.blur_binds[i * 2 + 1],
            );
        }

        fullscreen_pass(
            encoder,
            "glowdeck bloom combine",
            output_view,
            combine_pipeline,
            combine_bind,
        );
    }

    fn ensure_pipelines(&mut self, device: &wgpu::Device, output_format: wgpu::TextureFormat) {
        if self.sampler.is_none() {
            self.sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("glowdeck bloom sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            }));
        }

        if self.pass_layout.is_none() {
            self.pass_layout = Some(device.create_bind_group_layout(
                &wgpu::BindGroupLayoutDescriptor {
                    label: Some("glowdeck bloom pass bgl"),
                    entries: &[
                        texture_entry(0),
                        sampler_entry(1),
                        uniform_entry(2),
                    ],
                },
            ));
        }

        if self.combine_layout.is_none() {
            self.combine_layout = Some(device.create_bind_group_layout(
                &wgpu::BindGroupLayoutDescriptor {
                    label: Some("glowdeck bloom combine bgl"),
                    entries: &[
                        texture_entry(0),
                        sampler_entry(1),
                        uniform_entry(2),
                        texture_entry(3),
                        texture_entry(4),
                        texture_entry(5),
                        texture_entry(6),
                        texture_entry(7),
                    ],
                },
            ));
        }

        let (Some(pass_layout), Some(combine_layout)) =
            (self.pass_layout.as_ref(), self.combine_layout.as_ref())
        else {
            return;
        };

        if self.extract_pipeline.is_none() {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("glowdeck bloom extract shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/bloom_extract.wgsl").into()),
            });
            self.extract_pipeline = Some(fullscreen_pipeline(
                device,
                "glowdeck bloom extract pipeline",
                &shader,
                CHAIN_FORMAT,
                pass_layout,
            ));
        }

        if self.blur_pipeline.is_none() {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("glowdeck bloom blur shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/bloom_blur.wgsl").into()),
            });
            self.blur_pipeline = Some(fullscreen_pipeline(
                device,
                "glowdeck bloom blur pipeline",
                &shader,
                CHAIN_FORMAT,
                pass_layout,
            ));
        }

        if self.combine_pipeline.is_none() || self.combine_format != Some(output_format) {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("glowdeck bloom combine shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/bloom_combine.wgsl").into()),
            });
            self.combine_pipeline = Some(fullscreen_pipeline(
                device,
                "glowdeck bloom combine pipeline",
                &shader,
                output_format,
                combine_layout,
            ));
            self.combine_format = Some(output_format);
        }
    }

}

fn fullscreen_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
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
    })
}

fn fullscreen_pass(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bind: &wgpu::BindGroup,
) {
    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
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
    rpass.draw(0..3, 0..1);
}

fn blur_uniform(
    device: &wgpu::Device,
    texel_x: f32,
    texel_y: f32,
    radius: i32,
    sigma: f32,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("glowdeck bloom blur ubo"),
        contents: bytemuck::bytes_of(&BlurUniform {
            dir_texel: [texel_x, texel_y, radius as f32, sigma],
        }),
        usage: wgpu::BufferUsages::UNIFORM,
    })
}

fn pass_bind(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    src: &wgpu::TextureView,
    ubo: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(src),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: ubo.as_entire_binding(),
            },
        ],
    })
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ExtractUniform {
    threshold: f32,
    knee: f32,
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BlurUniform {
    /// xy texel-sized step direction, z kernel radius, w sigma.
    dir_texel: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CombineUniform {
    /// Per-level weights, strength and radius already folded in.
    weights: [[f32; 4]; 2],
}
