//! Window creation and the event-loop runtime.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
