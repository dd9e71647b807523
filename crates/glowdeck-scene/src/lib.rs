//! 3D side of glowdeck: scene graph, glTF loading, the forward renderer
//! with its bloom chain, and the panel overlay compositor.
//!
//! Units are meters, right-handed, +Y up. Colors are linear; the forward
//! pass renders into an HDR target and the bloom chain tonemaps into the
//! surface.

pub mod camera;
pub mod context;
pub mod error;
pub mod forward;
pub mod graph;
pub mod lights;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod orbit;
pub mod overlay;
pub mod post;

pub use camera::{CameraSnapshot, PerspectiveCamera};
pub use context::RenderContext;
pub use error::AssetError;
pub use forward::ForwardRenderer;
pub use graph::{Node, NodeId, SceneGraph, Transform};
pub use lights::{LightRig, PointLight};
pub use loader::{AssetLoader, LoadedScene};
pub use material::Material;
pub use mesh::{MeshData, Vertex};
pub use orbit::OrbitRig;
pub use overlay::{OverlayBinding, OverlayCompositor};
pub use post::{BloomChain, BloomSettings, FxPlan};
