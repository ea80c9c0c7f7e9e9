use tagpress_layout::FontError;
use tagpress_render_core::RenderError;
use thiserror::Error;

/// Every way a render can fail, from configuration to the written file.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration is invalid: {0}")]
    Config(String),

    #[error("Font loading failed: {0}")]
    Font(#[from] FontError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration JSON could not be parsed: {0}")]
    Json(#[from] serde_json::Error),
}
