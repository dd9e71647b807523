//! Colors and fills for the 2D draw stream.

mod color;
mod gradient;

pub use color::Color;
pub use gradient::LinearGradient;

/// How a shape is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Color),
    Gradient(LinearGradient),
}

impl From<Color> for Fill {
    fn from(c: Color) -> Self {
        Fill::Solid(c)
    }
}

impl From<LinearGradient> for Fill {
    fn from(g: LinearGradient) -> Self {
        Fill::Gradient(g)
    }
}
