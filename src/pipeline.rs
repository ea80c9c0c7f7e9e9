use crate::config::{ConfigFile, FontSelection, RenderConfig, RenderOptions};
use crate::error::PipelineError;
use crate::output;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tagpress_layout::{FontLibrary, PlacementCommand, layout_document};
use tagpress_markup::compile_document;
use tagpress_render_core::DocumentRenderer;
use tagpress_render_lopdf::LopdfRenderer;
use tagpress_resource::FilesystemResourceProvider;
use tagpress_traits::ResourceProvider;

/// A builder for creating a [`RenderPipeline`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    file: Option<ConfigFile>,
    options: RenderOptions,
    provider: Option<Arc<dyn ResourceProvider>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON configuration file. Relative font paths in it are
    /// resolved against the file's directory.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.file = Some(ConfigFile::load(path)?);
        Ok(self)
    }

    /// Uses a JSON configuration held in memory.
    pub fn with_config_source(mut self, source: &str) -> Result<Self, PipelineError> {
        self.file = Some(ConfigFile::from_json(source)?);
        Ok(self)
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Loads font files through `provider` instead of the filesystem.
    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Resolves the configuration and loads every font face.
    ///
    /// All configuration and font failures surface here, before any text
    /// is laid out.
    pub fn build(self) -> Result<RenderPipeline, PipelineError> {
        let config = RenderConfig::resolve(&self.options, self.file.as_ref())?;
        let fonts = load_fonts(&config.fonts, self.provider)?;
        debug!(
            "Pipeline ready: {}x{} page, {}pt text, {}pt lines",
            config.page.width, config.page.height, config.font_size, config.line_height
        );
        Ok(RenderPipeline { config, fonts })
    }
}

fn load_fonts(
    selection: &FontSelection,
    provider: Option<Arc<dyn ResourceProvider>>,
) -> Result<FontLibrary, PipelineError> {
    match selection {
        FontSelection::Standard => Ok(FontLibrary::standard()),
        FontSelection::Files { sources, base_dir } => {
            let provider: Arc<dyn ResourceProvider> = match (provider, base_dir) {
                (Some(provider), _) => provider,
                (None, Some(base)) => Arc::new(FilesystemResourceProvider::new(base)),
                (None, None) => Arc::new(FilesystemResourceProvider::current_dir()),
            };
            Ok(FontLibrary::from_sources(sources, provider.as_ref())?)
        }
        FontSelection::SystemFamily(family) => system_family(family),
    }
}

#[cfg(feature = "system-fonts")]
fn system_family(family: &str) -> Result<FontLibrary, PipelineError> {
    Ok(FontLibrary::from_system_family(family)?)
}

#[cfg(not(feature = "system-fonts"))]
fn system_family(family: &str) -> Result<FontLibrary, PipelineError> {
    Err(PipelineError::Config(format!(
        "font family '{}' requested but system font lookup is disabled",
        family
    )))
}

/// A configured renderer: markup in, PDF out.
///
/// Immutable after construction, so one pipeline can serve concurrent
/// renders.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    config: RenderConfig,
    fonts: FontLibrary,
}

impl RenderPipeline {
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Compiles and positions `text` without drawing it.
    pub fn layout(&self, text: &str) -> Vec<PlacementCommand> {
        let lines = compile_document(text);
        layout_document(&lines, &self.config.layout_settings(), &self.fonts)
    }

    /// Renders `text` to PDF bytes.
    pub fn render(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        self.render_with(text, Box::new(LopdfRenderer::new(&self.fonts)))
    }

    /// Renders `text` into a caller-supplied document sink.
    pub fn render_with(
        &self,
        text: &str,
        mut renderer: Box<dyn DocumentRenderer>,
    ) -> Result<Vec<u8>, PipelineError> {
        let commands = self.layout(text);
        renderer.begin_page(self.config.page.width, self.config.page.height)?;
        for command in &commands {
            renderer.draw_text(command)?;
        }
        Ok(renderer.finish()?)
    }

    /// Renders `text` and writes it to a new timestamped file in the
    /// configured output directory. Nothing is written if rendering fails.
    pub fn render_to_file(&self, text: &str) -> Result<PathBuf, PipelineError> {
        let bytes = self.render(text)?;
        let path = output::write_document(
            &self.config.output_dir,
            &self.config.document_name,
            &bytes,
        )?;
        info!("Rendered document to '{}'", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagpress_layout::FontVariant;
    use tagpress_traits::InMemoryResourceProvider;
    use tagpress_types::Color;

    #[test]
    fn builds_with_standard_fonts_by_default() {
        let pipeline = PipelineBuilder::new().build().unwrap();
        assert_eq!(
            pipeline.fonts().face(FontVariant::Bold).base_font_name(),
            "Helvetica-Bold"
        );
    }

    #[test]
    fn layout_uses_resolved_settings() {
        let pipeline = PipelineBuilder::new()
            .with_config_source(r#"{ "fontSize": 10, "margin": { "top": 20, "left": 30 } }"#)
            .unwrap()
            .build()
            .unwrap();
        let commands = pipeline.layout("<#00FF00>go");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].x, 30.0);
        assert_eq!(commands[0].y, 822.0);
        assert_eq!(commands[0].size, 10.0);
        assert_eq!(commands[0].color, Color::rgb(0, 255, 0));
    }

    #[test]
    fn missing_font_fails_at_build() {
        let provider = Arc::new(InMemoryResourceProvider::new());
        let err = PipelineBuilder::new()
            .with_config_source(r#"{ "fonts": { "regular": "missing.ttf" } }"#)
            .unwrap()
            .with_resource_provider(provider)
            .build()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Font(_)));
    }

    #[test]
    fn invalid_options_fail_at_build() {
        let err = PipelineBuilder::new()
            .with_options(RenderOptions {
                font_size: Some(-1.0),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let pipeline = PipelineBuilder::new().build().unwrap();
        let bytes = pipeline.render("<b>Hi</b> there").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn pipeline_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderPipeline>();
    }
}
