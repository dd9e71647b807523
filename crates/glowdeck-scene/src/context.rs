use crate::camera::PerspectiveCamera;
use crate::forward::{DEPTH_FORMAT, HDR_FORMAT};
use crate::post::{BloomChain, BloomSettings, FxPlan};

/// Per-viewport render state: the HDR color target, the depth buffer, the
/// bloom chain sized to match, and the camera's aspect ratio.
///
/// `resize` only records the new extent; `prepare` recreates every GPU
/// resource in one step the next time a frame starts, so the targets and
/// the chain can never disagree about sizes mid-frame.
pub struct RenderContext {
    size: (u32, u32),
    plan: FxPlan,
    pub camera: PerspectiveCamera,
    pub bloom: BloomChain,

    hdr: Option<wgpu::Texture>,
    hdr_view: Option<wgpu::TextureView>,
    depth: Option<wgpu::Texture>,
    depth_view: Option<wgpu::TextureView>,

    targets_dirty: bool,
    output_format: Option<wgpu::TextureFormat>,
}

impl RenderContext {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        let size = (width_px.max(1), height_px.max(1));
        let mut camera = PerspectiveCamera::new(35.0, 0.1, 100.0);
        camera.set_viewport(size.0, size.1);
        Self {
            size,
            plan: FxPlan::for_viewport(size.0, size.1),
            camera,
            bloom: BloomChain::new(BloomSettings::default()),
            hdr: None,
            hdr_view: None,
            depth: None,
            depth_view: None,
            targets_dirty: true,
            output_format: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn plan(&self) -> &FxPlan {
        &self.plan
    }

    /// Records a new viewport extent. Zero extents are ignored so a
    /// minimized window keeps the last valid targets.
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        if width_px == 0 || height_px == 0 {
            return;
        }
        if (width_px, height_px) == self.size {
            return;
        }
        self.size = (width_px, height_px);
        self.plan = FxPlan::for_viewport(width_px, height_px);
        self.camera.set_viewport(width_px, height_px);
        self.targets_dirty = true;
    }

    /// Rebuilds the targets and the bloom chain if anything changed since
    /// the last frame. Call once at the top of every frame.
    pub fn prepare(&mut self, device: &wgpu::Device, output_format: wgpu::TextureFormat) {
        if !self.targets_dirty && self.output_format == Some(output_format) {
            return;
        }

        let make = |label: &str, format: wgpu::TextureFormat| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: self.size.0,
                    height: self.size.1,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            })
        };

        let hdr = make("glowdeck hdr target", HDR_FORMAT);
        let hdr_view = hdr.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = make("glowdeck depth target", DEPTH_FORMAT);
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        self.bloom.rebuild(device, &self.plan, &hdr_view, output_format);

        self.hdr = Some(hdr);
        self.hdr_view = Some(hdr_view);
        self.depth = Some(depth);
        self.depth_view = Some(depth_view);
        self.targets_dirty = false;
        self.output_format = Some(output_format);

        log::debug!(
            "render targets rebuilt: {}x{}, {} bloom levels",
            self.size.0,
            self.size.1,
            self.plan.level_count(),
        );
    }

    /// Valid after `prepare`.
    pub fn hdr_view(&self) -> Option<&wgpu::TextureView> {
        self.hdr_view.as_ref()
    }

    /// Valid after `prepare`.
    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth_view.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_plan_and_aspect() {
        let mut ctx = RenderContext::new(800, 800);
        assert_eq!(ctx.plan().levels[0], (400, 400));
        assert_eq!(ctx.camera.aspect, 1.0);

        ctx.resize(1600, 800);
        assert_eq!(ctx.plan().levels[0], (800, 400));
        assert_eq!(ctx.camera.aspect, 2.0);
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut ctx = RenderContext::new(800, 600);
        ctx.resize(0, 600);
        assert_eq!(ctx.size(), (800, 600));
        assert_eq!(ctx.camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn new_clamps_to_one_pixel() {
        let ctx = RenderContext::new(0, 0);
        assert_eq!(ctx.size(), (1, 1));
        assert!(!ctx.plan().levels.is_empty());
    }
}
