//! Post-processing: the bloom chain between the HDR forward target and the
//! surface.

mod bloom;
mod plan;

pub use bloom::{BloomChain, BloomSettings};
pub use plan::FxPlan;
