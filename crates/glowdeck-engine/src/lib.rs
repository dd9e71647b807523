//! Glowdeck engine crate.
//!
//! Platform + GPU runtime pieces shared by the 3D scene stack and the panel
//! UI: device/surface management, the window runtime, input, timing, logging,
//! logical-pixel geometry, and the 2D draw-stream renderers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
