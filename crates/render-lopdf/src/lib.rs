//! PDF document sink built on lopdf.
//!
//! [`LopdfRenderer`] implements `DocumentRenderer`: it registers the faces of
//! a `FontLibrary` as page resources, turns placement commands into text
//! operators, and serializes the document to bytes.

mod helpers;
mod renderer;
mod writer;

pub use helpers::{font_dictionary, text_string};
pub use renderer::LopdfRenderer;
pub use writer::PdfWriter;
