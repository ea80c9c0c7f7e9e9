//! Line layout for compiled markup.
//!
//! [`layout_document`] walks the fragment lines produced by `tagpress-markup`
//! and turns each fragment into an absolutely positioned [`PlacementCommand`].
//! Horizontal advance comes from a [`TextMeasure`], normally the
//! [`FontLibrary`] whose faces the PDF sink later draws with.

pub mod encoding;
mod engine;
pub mod fonts;
mod standard_metrics;

pub use self::engine::{
    Cursor, LayoutSettings, LineLayoutEngine, PlacementCommand, TextMeasure, layout_document,
    line_bottom_margin, line_top_margin,
};
pub use self::fonts::{FontError, FontFace, FontLibrary, FontSources, StandardFont, TrueTypeFont};

pub use tagpress_markup::TextFragment;
pub use tagpress_types::{Color, FontVariant};

#[cfg(test)]
mod test_utils;
