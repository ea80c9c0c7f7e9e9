//! Renders inline-tagged text onto a PDF page.
//!
//! Input is plain text with lightweight inline tags:
//!
//! ```text
//! <b>Hello</b> <24>big</24> <#CC0000>red</#>
//! <mt8><ml12>indented, with space above</m>
//! ```
//!
//! Each line is compiled into styled fragments, positioned by the line
//! layout engine, and drawn into a single-page PDF.
//!
//! ```no_run
//! use tagpress::{PipelineBuilder, PipelineError};
//!
//! fn main() -> Result<(), PipelineError> {
//!     let pipeline = PipelineBuilder::new()
//!         .with_config_file("tagpress.json")?
//!         .build()?;
//!     let path = pipeline.render_to_file("<b>Hi</b> there")?;
//!     println!("{}", path.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

pub use config::{ConfigFile, FontSelection, RenderConfig, RenderOptions};
pub use error::PipelineError;
pub use output::output_path;
pub use pipeline::{PipelineBuilder, RenderPipeline};

pub use tagpress_layout::{
    FontError, FontLibrary, FontSources, LayoutSettings, PlacementCommand, TextMeasure,
    layout_document,
};
pub use tagpress_markup::{StyleState, TextFragment, compile_document, compile_line, strip_tags};
pub use tagpress_render_core::{DocumentRenderer, RenderError};
pub use tagpress_render_lopdf::LopdfRenderer;
pub use tagpress_types::{Color, EdgeMargins, FontVariant, PageSize};
