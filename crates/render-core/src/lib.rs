//! Core rendering abstractions.
//!
//! - `DocumentRenderer`: the page sink placement commands are drawn into
//! - `RenderError`: errors a sink can raise

mod error;
mod traits;

pub use error::RenderError;
pub use traits::DocumentRenderer;
