//! Shared GPU types and helpers used by all shape renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport, logical_clip_to_scissor};
use crate::paint::Fill;
use crate::scene::DrawCmd;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
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
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    /// Logical size of the target.
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

/// Minimum binding size for the viewport UBO. `ViewportUniform` is 16 bytes,
/// so the value is always non-zero; centralising this keeps `.unwrap()` out
/// of each pipeline-creation site.
pub(super) fn viewport_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
        .expect("ViewportUniform has non-zero size by construction")
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── scissor ───────────────────────────────────────────────────────────────

/// Scissor args for a clip, clamped to the viewport. `None` clip means "no
/// scissor" and yields the full viewport; a fully clipped draw yields `None`.
pub(super) fn clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale_factor: f32,
) -> Option<(u32, u32, u32, u32)> {
    match clip {
        None => Some((0, 0, viewport.width_px, viewport.height_px)),
        Some(r) => logical_clip_to_scissor(r, viewport, scale_factor),
    }
}

// ── clip tracking ─────────────────────────────────────────────────────────

/// Tracks the effective clip while walking a draw stream.
///
/// The draw list pre-intersects nested clips, so the tracker only needs the
/// innermost pushed rect.
#[derive(Debug, Default)]
pub(super) struct ClipTracker {
    stack: Vec<Rect>,
}

impl ClipTracker {
    /// Consumes clip commands; returns `true` when `cmd` was one.
    pub(super) fn apply(&mut self, cmd: &DrawCmd) -> bool {
        match cmd {
            DrawCmd::PushClip(r) => {
                self.stack.push(*r);
                true
            }
            DrawCmd::PopClip => {
                self.stack.pop();
                true
            }
            _ => false,
        }
    }

    pub(super) fn current(&self) -> Option<Rect> {
        self.stack.last().copied()
    }
}

// ── fill resolution ───────────────────────────────────────────────────────

/// Converts a `Fill` to `(color0, color1, grad_p0, grad_p1)` for the
/// gradient-capable shaders. Solid fills produce identical colors and a
/// zero-length gradient axis, which the shader treats as a uniform fill.
/// Gradient points stay in unit space; the vertex shader scales them.
pub(super) fn resolve_fill(fill: &Fill) -> ([f32; 4], [f32; 4], [f32; 2], [f32; 2]) {
    match fill {
        Fill::Solid(c) => {
            let col = c.to_array();
            (col, col, [0.0, 0.0], [0.0, 0.0])
        }
        Fill::Gradient(g) => (
            g.from.to_array(),
            g.to.to_array(),
            [g.start.x, g.start.y],
            [g.end.x, g.end.y],
        ),
    }
}
