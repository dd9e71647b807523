use std::path::Path;

use glam::Mat4;
use winit::window::CursorIcon;

use glowdeck_engine::coords::{Vec2, Viewport};
use glowdeck_engine::core::{App, AppControl, FrameCtx};
use glowdeck_engine::input::{InputEvent, KeyState, MouseButton, MouseButtonState};
use glowdeck_engine::paint::Color;
use glowdeck_engine::render::shapes::{
    CircleRenderer, ImageRenderer, RoundedRectRenderer, TextRenderer,
};
use glowdeck_engine::render::{RenderCtx, RenderTarget};
use glowdeck_engine::text::{FontId, FontSystem};
use glowdeck_qrlink::{DOWNLOAD_FILENAME, HttpTransport, SubmitFlow, SubmitPhase, dataurl};
use glowdeck_scene::{
    AssetLoader, CameraSnapshot, ForwardRenderer, LightRig, LoadedScene, OrbitRig,
    OverlayBinding, OverlayCompositor, RenderContext,
};
use glowdeck_ui::widgets::decode_rgba;
use glowdeck_ui::{UiEvent, UiScene};

use crate::panel::{PANEL_HEIGHT, PANEL_WIDTH, Panel};

/// Node the panel attaches to when the asset provides one.
const SCREEN_NODE: &str = "Screen";

/// Surface clear color, shown while the asset is still loading. Matches
/// the scene fog so the handoff is seamless.
const CLEAR_COLOR: u32 = 0x06080E;

/// The application: a neon tablet scene with the QR form composited onto
/// the tablet's screen.
///
/// Per frame: poll the asset loader and the submit worker, route pointer
/// input either to the panel (when the cursor ray hits the screen quad) or
/// to the orbit rig, run the panel's widget frame, then record the render
/// passes: panel texture, forward scene into HDR, bloom to the surface,
/// panel quad on top.
pub struct StudioApp {
    fonts: FontSystem,

    ctx3d: RenderContext,
    forward: ForwardRenderer,
    lights: LightRig,
    orbit: OrbitRig,

    loader: Option<AssetLoader>,
    scene: Option<LoadedScene>,
    overlay: OverlayCompositor,
    binding: Option<OverlayBinding>,

    panel: Panel,
    ui: UiScene,
    rects: RoundedRectRenderer,
    circles: CircleRenderer,
    texts: TextRenderer,
    images: ImageRenderer,

    submit: SubmitFlow<HttpTransport>,
    seen_phase: SubmitPhase,
    qr_data_url: Option<String>,
    pending_qr: Option<(Vec<u8>, u32, u32)>,

    orbit_dragging: bool,
}

impl StudioApp {
    pub fn new(fonts: FontSystem, font: FontId, asset_path: String, server_url: &str) -> Self {
        Self {
            fonts,
            ctx3d: RenderContext::new(1, 1),
            forward: ForwardRenderer::new(),
            lights: LightRig::tablet_default(),
            orbit: OrbitRig::tablet_default(),
            loader: Some(AssetLoader::spawn(asset_path)),
            scene: None,
            overlay: OverlayCompositor::new(PANEL_WIDTH, PANEL_HEIGHT),
            binding: None,
            panel: Panel::new(font),
            ui: UiScene::new(Vec2::new(PANEL_WIDTH as f32, PANEL_HEIGHT as f32)),
            rects: RoundedRectRenderer::new(),
            circles: CircleRenderer::new(),
            texts: TextRenderer::new(),
            images: ImageRenderer::new(),
            submit: SubmitFlow::new(HttpTransport::new(server_url)),
            seen_phase: SubmitPhase::Idle,
            qr_data_url: None,
            pending_qr: None,
            orbit_dragging: false,
        }
    }

    fn poll_loader(&mut self, device: &wgpu::Device) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        let Some(result) = loader.poll() else { return };
        self.loader = None;

        match result {
            Ok(loaded) => {
                self.forward.upload_scene(device, &loaded);
                let node = loaded.graph.find_by_name(SCREEN_NODE).or_else(|| {
                    log::warn!("no '{SCREEN_NODE}' node, panel attaches to the scene root");
                    loaded.graph.roots().first().copied()
                });
                self.binding = node.map(OverlayBinding::new);
                self.scene = Some(loaded);
            }
            Err(e) => {
                // Scene stays empty; the render loop keeps running.
                log::error!("asset unavailable: {e}");
            }
        }
    }

    fn poll_submit(&mut self) {
        self.submit.poll();
        let phase = self.submit.phase().clone();
        if phase == self.seen_phase {
            return;
        }

        match &phase {
            SubmitPhase::EncodingLogo | SubmitPhase::Sending => {
                self.panel.set_phase(&phase);
            }
            SubmitPhase::Success { image } => {
                self.qr_data_url = Some(image.clone());
                match dataurl::decode(image) {
                    Ok(bytes) => match decode_rgba(&bytes) {
                        Ok((pixels, w, h)) => self.pending_qr = Some((pixels, w, h)),
                        Err(e) => log::error!("returned QR image is unusable: {e}"),
                    },
                    Err(e) => log::error!("returned QR image is not a data URL: {e}"),
                }
                self.panel.set_phase(&phase);
                self.submit.acknowledge();
            }
            SubmitPhase::Failure { .. } => {
                self.panel.set_phase(&phase);
                self.submit.acknowledge();
            }
            // Leave the last status visible after an acknowledge.
            SubmitPhase::Idle => {}
        }
        self.seen_phase = phase;
    }

    fn overlay_model(&self) -> Option<Mat4> {
        let scene = self.scene.as_ref()?;
        let binding = self.binding.as_ref()?;
        Some(scene.graph.world_transform(binding.node))
    }

    /// Maps a logical-pixel cursor position to panel pixels, if the cursor
    /// ray hits the screen quad.
    fn panel_hit(
        &self,
        snap: &CameraSnapshot,
        cursor_logical: (f32, f32),
        scale: f32,
        viewport_px: (f32, f32),
    ) -> Option<Vec2> {
        let model = self.overlay_model()?;
        let binding = self.binding.as_ref()?;
        let cursor_px = (cursor_logical.0 * scale, cursor_logical.1 * scale);
        self.overlay
            .pointer_to_panel(snap, cursor_px, viewport_px, model, binding)
            .map(|(x, y)| Vec2::new(x, y))
    }

    fn save_download(&mut self) {
        let Some(url) = self.qr_data_url.as_deref() else {
            return;
        };
        match dataurl::save_download(url, Path::new(".")) {
            Ok(path) => {
                log::info!("saved {DOWNLOAD_FILENAME} to {}", path.display());
                self.panel.set_phase(&SubmitPhase::Idle);
            }
            Err(e) => {
                log::error!("download failed: {e}");
                self.panel.set_phase(&SubmitPhase::Failure {
                    message: format!("Could not save {DOWNLOAD_FILENAME}"),
                });
            }
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let size = ctx.gpu.size();
        self.ctx3d.resize(size.width, size.height);

        self.poll_loader(ctx.gpu.device());
        self.poll_submit();

        let scale = ctx.window.scale_factor();
        let viewport_px = (size.width as f32, size.height as f32);
        let snap = self
            .ctx3d
            .camera
            .snapshot(self.orbit.eye(), self.orbit.target());

        // Route input: events over the screen quad become panel events at
        // panel coordinates; everything else drives the orbit rig. A drag
        // that starts off the panel stays with the rig until release.
        let mut ui_events: Vec<UiEvent> = Vec::new();
        for ev in &ctx.input_frame.events {
            match ev {
                InputEvent::PointerMoved(m) => {
                    let hit = (!self.orbit_dragging)
                        .then(|| self.panel_hit(&snap, (m.x, m.y), scale, viewport_px))
                        .flatten();
                    // An off-panel position clears hover styling.
                    ui_events.push(UiEvent::PointerMoved(
                        hit.unwrap_or(Vec2::new(-1.0e4, -1.0e4)),
                    ));
                }
                InputEvent::PointerButton(b) if b.button == MouseButton::Left => {
                    let hit = self.panel_hit(&snap, (b.x, b.y), scale, viewport_px);
                    match b.state {
                        MouseButtonState::Pressed => match hit {
                            Some(p) => ui_events.push(UiEvent::PointerDown(p)),
                            None => {
                                self.orbit_dragging = true;
                                // Off-panel press blurs the focused field.
                                ui_events
                                    .push(UiEvent::PointerDown(Vec2::new(-1.0e4, -1.0e4)));
                            }
                        },
                        MouseButtonState::Released => {
                            self.orbit_dragging = false;
                            ui_events.push(UiEvent::PointerUp(
                                hit.unwrap_or(Vec2::new(-1.0e4, -1.0e4)),
                            ));
                        }
                    }
                }
                InputEvent::Text(t) => ui_events.push(UiEvent::Text(t.text.clone())),
                InputEvent::Key {
                    key,
                    state: KeyState::Pressed,
                    ..
                } => ui_events.push(UiEvent::Key(*key)),
                _ => {}
            }
        }

        let hover = ctx
            .input
            .pointer_pos
            .and_then(|pos| self.panel_hit(&snap, pos, scale, viewport_px));
        ctx.window.set_cursor(if hover.is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        });

        if self.orbit_dragging {
            let (dx, dy) = ctx.input_frame.pointer_delta;
            self.orbit.rotate(dx, dy);
        }
        if hover.is_none() && ctx.input_frame.wheel_lines != 0.0 {
            self.orbit.zoom(ctx.input_frame.wheel_lines);
        }
        self.orbit.update(ctx.dt);
        let snap = self
            .ctx3d
            .camera
            .snapshot(self.orbit.eye(), self.orbit.target());

        // A freshly returned QR image is uploaded before the panel paints,
        // so this frame's draw list already references the new handle.
        if let Some((pixels, w, h)) = self.pending_qr.take() {
            let rctx = RenderCtx::new(
                ctx.gpu.device(),
                ctx.gpu.queue(),
                OverlayCompositor::PANEL_FORMAT,
                Viewport::new(PANEL_WIDTH, PANEL_HEIGHT),
                1.0,
            );
            let old = self.panel.qr_image();
            let id = self.images.upload(&rctx, &pixels, w, h);
            if let Some(old) = old {
                self.images.remove(old);
            }
            self.panel.set_qr(id, w, h);
        }

        self.ui.frame(&mut self.panel, &self.fonts, 1.0, &ui_events);

        if self.panel.take_theme_toggle() {
            self.panel.toggle_theme();
        }
        if self.panel.take_generate() {
            self.submit.begin(self.panel.form_state());
        }
        if self.panel.take_download() {
            self.save_download();
        }

        self.ctx3d
            .prepare(ctx.gpu.device(), ctx.gpu.surface_format());

        let StudioApp {
            fonts,
            ctx3d,
            forward,
            lights,
            scene,
            overlay,
            binding,
            ui,
            rects,
            circles,
            texts,
            images,
            ..
        } = self;

        ctx.render(Color::from_hex(CLEAR_COLOR), |rctx, target| {
            // Panel texture pass: clear to transparent, then replay the
            // widget draw list with the 2D renderers.
            {
                let panel_view = overlay.panel_view(rctx.device);
                {
                    let _clear = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("glowdeck panel clear"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: panel_view,
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
                }

                let panel_ctx = RenderCtx::new(
                    rctx.device,
                    rctx.queue,
                    OverlayCompositor::PANEL_FORMAT,
                    Viewport::new(PANEL_WIDTH, PANEL_HEIGHT),
                    1.0,
                );
                let mut panel_target = RenderTarget::new(&mut *target.encoder, panel_view);
                let list = ui.draw_list();
                rects.render(&panel_ctx, &mut panel_target, list);
                circles.render(&panel_ctx, &mut panel_target, list);
                images.render(&panel_ctx, &mut panel_target, list);
                texts.render(&panel_ctx, &mut panel_target, list, fonts);
            }

            // 3D scene: forward pass into HDR, bloom resolve to the surface.
            if let Some(loaded) = scene.as_ref()
                && let (Some(hdr_view), Some(depth_view)) = (ctx3d.hdr_view(), ctx3d.depth_view())
            {
                forward.render(
                    rctx.device,
                    rctx.queue,
                    target.encoder,
                    hdr_view,
                    depth_view,
                    &loaded.graph,
                    &loaded.materials,
                    &snap,
                    lights,
                );
                ctx3d.bloom.render(target.encoder, target.color_view);

                if let Some(binding) = binding.as_ref() {
                    let model = loaded.graph.world_transform(binding.node);
                    overlay.render(
                        rctx.device,
                        rctx.queue,
                        target.encoder,
                        target.color_view,
                        rctx.surface_format,
                        &snap,
                        model,
                        binding,
                    );
                }
            }
        })
    }
}
