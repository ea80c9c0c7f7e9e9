//! Render configuration: a static JSON file, explicit options, and the
//! resolved values a pipeline is built from.
//!
//! Precedence is options over file over built-in defaults. Resolution happens
//! once, before any font is loaded or any text is laid out.

use crate::error::PipelineError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tagpress_layout::{FontSources, LayoutSettings};
use tagpress_types::{Color, PageSize};

pub const DEFAULT_FONT_SIZE: f32 = 14.0;
/// Added to the font size when no line height is configured.
pub const DEFAULT_LEADING: f32 = 10.0;
pub const DEFAULT_MARGIN: f32 = 50.0;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_DOCUMENT_NAME: &str = "document";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSection {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarginSection {
    pub top: Option<f32>,
    pub left: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FontsSection {
    pub regular: String,
    pub bold: Option<String>,
    pub italic: Option<String>,
    pub bold_italic: Option<String>,
}

impl From<FontsSection> for FontSources {
    fn from(section: FontsSection) -> Self {
        FontSources {
            regular: section.regular,
            bold: section.bold,
            italic: section.italic,
            bold_italic: section.bold_italic,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
    pub name: Option<String>,
}

/// The on-disk configuration document. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub page: PageSection,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub color: Option<Color>,
    #[serde(default)]
    pub margin: MarginSection,
    pub fonts: Option<FontsSection>,
    pub font_family: Option<String>,
    #[serde(default)]
    pub output: OutputSection,

    /// Directory relative font paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn from_json(source: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads and parses `path`; font paths become relative to its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read configuration from '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut file = Self::from_json(&source)?;
        file.base_dir = Some(
            path.parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        );
        Ok(file)
    }
}

/// Explicit per-call settings. Anything left `None` falls through to the
/// configuration file, then to the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub page_size: Option<PageSize>,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub color: Option<Color>,
    pub margin_top: Option<f32>,
    pub margin_left: Option<f32>,
    pub fonts: Option<FontSources>,
    pub font_family: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub document_name: Option<String>,
}

/// Where the four faces come from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FontSelection {
    /// Built-in Helvetica; needs no font files.
    #[default]
    Standard,
    Files {
        sources: FontSources,
        base_dir: Option<PathBuf>,
    },
    SystemFamily(String),
}

/// Fully resolved settings. Immutable once a pipeline is built.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub page: PageSize,
    pub font_size: f32,
    pub line_height: f32,
    pub color: Color,
    pub margin_top: f32,
    pub margin_left: f32,
    pub fonts: FontSelection,
    pub output_dir: PathBuf,
    pub document_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            font_size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_FONT_SIZE + DEFAULT_LEADING,
            color: Color::BLACK,
            margin_top: DEFAULT_MARGIN,
            margin_left: DEFAULT_MARGIN,
            fonts: FontSelection::Standard,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn resolve(options: &RenderOptions, file: Option<&ConfigFile>) -> Result<Self, PipelineError> {
        let empty = ConfigFile::default();
        let file = file.unwrap_or(&empty);
        let defaults = Self::default();

        let page = PageSize {
            width: options
                .page_size
                .map(|p| p.width)
                .or(file.page.width)
                .unwrap_or(defaults.page.width),
            height: options
                .page_size
                .map(|p| p.height)
                .or(file.page.height)
                .unwrap_or(defaults.page.height),
        };
        let font_size = options
            .font_size
            .or(file.font_size)
            .unwrap_or(defaults.font_size);
        let line_height = options
            .line_height
            .or(file.line_height)
            .unwrap_or(font_size + DEFAULT_LEADING);

        let config = Self {
            page,
            font_size,
            line_height,
            color: options.color.or(file.color).unwrap_or(defaults.color),
            margin_top: options
                .margin_top
                .or(file.margin.top)
                .unwrap_or(defaults.margin_top),
            margin_left: options
                .margin_left
                .or(file.margin.left)
                .unwrap_or(defaults.margin_left),
            fonts: resolve_fonts(options, file)?,
            output_dir: options
                .output_dir
                .clone()
                .or_else(|| file.output.dir.clone())
                .unwrap_or(defaults.output_dir),
            document_name: options
                .document_name
                .clone()
                .or_else(|| file.output.name.clone())
                .unwrap_or(defaults.document_name),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        positive("page width", self.page.width)?;
        positive("page height", self.page.height)?;
        positive("font size", self.font_size)?;
        positive("line height", self.line_height)?;
        non_negative("top margin", self.margin_top)?;
        non_negative("left margin", self.margin_left)?;
        if self.document_name.trim().is_empty() {
            return Err(PipelineError::Config(
                "document name must not be empty".to_string(),
            ));
        }
        match &self.fonts {
            FontSelection::Files { sources, .. } if sources.regular.trim().is_empty() => Err(
                PipelineError::Config("a regular font path is required".to_string()),
            ),
            FontSelection::SystemFamily(family) if family.trim().is_empty() => Err(
                PipelineError::Config("font family must not be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// The slice of the configuration the line layout engine reads.
    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            base_font_size: self.font_size,
            line_height: self.line_height,
            left_margin: self.margin_left,
            top_margin: self.margin_top,
            page_height: self.page.height,
            default_color: self.color,
        }
    }
}

// The highest tier that names any font wins; naming both files and a family
// in the same tier is ambiguous.
fn resolve_fonts(options: &RenderOptions, file: &ConfigFile) -> Result<FontSelection, PipelineError> {
    let from_options = tier_fonts(
        options.fonts.clone(),
        options.font_family.clone(),
        None,
    )?;
    if let Some(selection) = from_options {
        return Ok(selection);
    }
    let from_file = tier_fonts(
        file.fonts.clone().map(FontSources::from),
        file.font_family.clone(),
        file.base_dir.clone(),
    )?;
    Ok(from_file.unwrap_or_default())
}

fn tier_fonts(
    sources: Option<FontSources>,
    family: Option<String>,
    base_dir: Option<PathBuf>,
) -> Result<Option<FontSelection>, PipelineError> {
    match (sources, family) {
        (Some(_), Some(family)) => Err(PipelineError::Config(format!(
            "both font files and the font family '{}' are set",
            family
        ))),
        (Some(sources), None) => Ok(Some(FontSelection::Files { sources, base_dir })),
        (None, Some(family)) => Ok(Some(FontSelection::SystemFamily(family))),
        (None, None) => Ok(None),
    }
}

fn positive(what: &str, value: f32) -> Result<(), PipelineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PipelineError::Config(format!(
            "{} must be a positive number, got {}",
            what, value
        )))
    }
}

fn non_negative(what: &str, value: f32) -> Result<(), PipelineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PipelineError::Config(format!(
            "{} must not be negative, got {}",
            what, value
        )))
    }
}
