pub mod color;
pub mod font;
pub mod geometry;

pub use color::Color;
pub use font::FontVariant;
pub use geometry::{EdgeMargins, PageSize};
