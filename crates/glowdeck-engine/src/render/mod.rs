//! GPU renderers for the 2D draw stream.
//!
//! Each renderer owns its pipelines and buffers and consumes one command
//! kind from a [`DrawList`](crate::scene::DrawList). Convention: CPU
//! geometry is logical pixels (top-left origin, +Y down); the vertex shaders
//! convert to NDC via a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
