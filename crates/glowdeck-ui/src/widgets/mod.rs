//! The form controls the panel is built from.

mod button;
mod image_view;
mod label;
mod radio;
mod swatch;
mod textbox;

pub use button::Button;
pub use image_view::{ImageView, decode_rgba};
pub use label::Label;
pub use radio::RadioGroup;
pub use swatch::ColorSwatch;
pub use textbox::Textbox;
