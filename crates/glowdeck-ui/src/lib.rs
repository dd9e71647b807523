//! Retained widget layer over the engine's 2D draw list: layout
//! constraints, pointer/text event routing, and the form controls the
//! panel is built from.

pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use constraints::Constraints;
pub use event::{EventResult, UiEvent};
pub use painter::Painter;
pub use scene::UiScene;
pub use widget::{Element, LayoutCtx, Widget};
