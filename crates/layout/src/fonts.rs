//! Font library for layout and rendering.
//!
//! A [`FontLibrary`] holds one [`FontFace`] per [`FontVariant`]. Faces come
//! from one of three places:
//! - the built-in Helvetica family (no files needed, not embedded),
//! - TrueType files read through a [`ResourceProvider`],
//! - a system font family looked up with fontdb (feature: `system-fonts`).
//!
//! The library is loaded once, before layout, and then only read. It measures
//! text the same way the PDF sink encodes it, so advances match the drawing.

use crate::encoding::{decode_code, encode_win_ansi};
use crate::engine::TextMeasure;
use crate::standard_metrics::{FALLBACK_WIDTH, FIRST_CODE, HELVETICA, HELVETICA_BOLD};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::Arc;
use tagpress_traits::{ResourceError, ResourceProvider, SharedResourceData};
use tagpress_types::FontVariant;
use thiserror::Error;

/// First and last WinAnsi codes covered by an embedded width table.
pub const EMBEDDED_FIRST_CHAR: u8 = 32;
pub const EMBEDDED_LAST_CHAR: u8 = 255;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font file '{path}' for the {variant} face could not be loaded: {source}")]
    Missing {
        variant: FontVariant,
        path: String,
        #[source]
        source: ResourceError,
    },
    #[error("Font data for the {variant} face could not be parsed: {message}")]
    Parse { variant: FontVariant, message: String },
    #[error("System font family '{0}' was not found")]
    SystemFontNotFound(String),
}

/// One of the PDF standard Type1 fonts, drawn by name and never embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardFont {
    pub base_font: &'static str,
    widths: &'static [u16; 95],
}

impl StandardFont {
    pub fn helvetica(variant: FontVariant) -> Self {
        let (base_font, widths) = match variant {
            FontVariant::Normal => ("Helvetica", &HELVETICA),
            FontVariant::Bold => ("Helvetica-Bold", &HELVETICA_BOLD),
            FontVariant::Italic => ("Helvetica-Oblique", &HELVETICA),
            FontVariant::BoldItalic => ("Helvetica-BoldOblique", &HELVETICA_BOLD),
        };
        Self { base_font, widths }
    }

    fn code_width(&self, code: u8) -> u16 {
        code.checked_sub(FIRST_CODE)
            .and_then(|index| self.widths.get(index as usize))
            .copied()
            .unwrap_or(FALLBACK_WIDTH)
    }
}

/// A parsed TrueType face with the metrics needed to embed it as a simple
/// WinAnsi-encoded font. All metrics are in 1/1000 em.
#[derive(Clone)]
pub struct TrueTypeFont {
    pub postscript_name: String,
    pub data: SharedResourceData,
    /// Advances for codes `EMBEDDED_FIRST_CHAR..=EMBEDDED_LAST_CHAR`.
    pub widths: Vec<u16>,
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
    pub bbox: [f32; 4],
    pub italic_angle: f32,
    pub is_fixed_pitch: bool,
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("postscript_name", &self.postscript_name)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl TrueTypeFont {
    /// Parses `data` and builds the WinAnsi width table.
    pub fn parse(variant: FontVariant, data: SharedResourceData) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| FontError::Parse {
            variant,
            message: e.to_string(),
        })?;
        if face.number_of_glyphs() == 0 {
            return Err(FontError::Parse {
                variant,
                message: "font has no glyphs".to_string(),
            });
        }

        let scale = 1000.0 / face.units_per_em() as f32;
        let to_thousandths = |units: f32| (units * scale).round();
        let notdef_advance = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .unwrap_or(0);

        let widths = (EMBEDDED_FIRST_CHAR..=EMBEDDED_LAST_CHAR)
            .map(|code| match decode_code(code) {
                Some(c) => {
                    let advance = face
                        .glyph_index(c)
                        .and_then(|glyph| face.glyph_hor_advance(glyph))
                        .unwrap_or(notdef_advance);
                    to_thousandths(advance as f32) as u16
                }
                None => 0,
            })
            .collect();

        let bbox = face.global_bounding_box();
        let ascent = to_thousandths(face.ascender() as f32);
        let postscript_name = face
            .names()
            .into_iter()
            .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .map(|name| sanitize_postscript_name(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Tagpress-{}", variant));

        Ok(Self {
            postscript_name,
            widths,
            ascent,
            descent: to_thousandths(face.descender() as f32),
            cap_height: face
                .capital_height()
                .map(|h| to_thousandths(h as f32))
                .unwrap_or(ascent),
            bbox: [
                to_thousandths(bbox.x_min as f32),
                to_thousandths(bbox.y_min as f32),
                to_thousandths(bbox.x_max as f32),
                to_thousandths(bbox.y_max as f32),
            ],
            italic_angle: if variant.is_italic() { -12.0 } else { 0.0 },
            is_fixed_pitch: face.is_monospaced(),
            data,
        })
    }

    fn code_width(&self, code: u8) -> u16 {
        code.checked_sub(EMBEDDED_FIRST_CHAR)
            .and_then(|index| self.widths.get(index as usize))
            .copied()
            .unwrap_or(0)
    }
}

/// PostScript names may not contain whitespace or PDF delimiters.
fn sanitize_postscript_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
        .collect()
}

#[derive(Debug, Clone)]
pub enum FontFace {
    Standard(StandardFont),
    TrueType(TrueTypeFont),
}

impl FontFace {
    pub fn base_font_name(&self) -> &str {
        match self {
            FontFace::Standard(font) => font.base_font,
            FontFace::TrueType(font) => &font.postscript_name,
        }
    }

    /// Advance of a single WinAnsi code in 1/1000 em.
    pub fn code_width(&self, code: u8) -> u16 {
        match self {
            FontFace::Standard(font) => font.code_width(code),
            FontFace::TrueType(font) => font.code_width(code),
        }
    }

    pub fn width_of(&self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| self.code_width(code) as u32)
            .sum();
        units as f32 * size / 1000.0
    }
}

/// File locations of the four faces. Only `regular` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontSources {
    pub regular: String,
    pub bold: Option<String>,
    pub italic: Option<String>,
    pub bold_italic: Option<String>,
}

impl FontSources {
    fn path_for(&self, variant: FontVariant) -> Option<&str> {
        match variant {
            FontVariant::Normal => Some(&self.regular),
            FontVariant::Bold => self.bold.as_deref(),
            FontVariant::Italic => self.italic.as_deref(),
            FontVariant::BoldItalic => self.bold_italic.as_deref(),
        }
    }
}

/// The four faces a document is drawn and measured with.
#[derive(Debug, Clone)]
pub struct FontLibrary {
    faces: BTreeMap<FontVariant, Arc<FontFace>>,
}

impl FontLibrary {
    /// The built-in Helvetica family.
    pub fn standard() -> Self {
        let faces = FontVariant::ALL
            .into_iter()
            .map(|variant| {
                (
                    variant,
                    Arc::new(FontFace::Standard(StandardFont::helvetica(variant))),
                )
            })
            .collect();
        Self { faces }
    }

    /// Loads TrueType faces through `provider`.
    ///
    /// A variant without a path reuses the regular face.
    pub fn from_sources(
        sources: &FontSources,
        provider: &dyn ResourceProvider,
    ) -> Result<Self, FontError> {
        let load = |variant: FontVariant, path: &str| -> Result<Arc<FontFace>, FontError> {
            debug!(
                "Loading {} face from '{}' via {}",
                variant,
                path,
                provider.name()
            );
            let data = provider.load(path).map_err(|source| FontError::Missing {
                variant,
                path: path.to_string(),
                source,
            })?;
            Ok(Arc::new(FontFace::TrueType(TrueTypeFont::parse(variant, data)?)))
        };

        let regular = load(FontVariant::Normal, &sources.regular)?;
        let mut faces = BTreeMap::new();
        for variant in FontVariant::ALL {
            let face = match sources.path_for(variant) {
                Some(_) if variant == FontVariant::Normal => regular.clone(),
                Some(path) => load(variant, path)?,
                None => {
                    warn!("No {} font configured, using the regular face", variant);
                    regular.clone()
                }
            };
            faces.insert(variant, face);
        }
        Ok(Self { faces })
    }

    /// Resolves the four faces of an installed font family.
    #[cfg(feature = "system-fonts")]
    pub fn from_system_family(family: &str) -> Result<Self, FontError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        debug!("Searching {} system font faces for '{}'", db.len(), family);

        let mut faces = BTreeMap::new();
        for variant in FontVariant::ALL {
            let families = [fontdb::Family::Name(family)];
            let query = fontdb::Query {
                families: &families,
                weight: if variant.is_bold() {
                    fontdb::Weight::BOLD
                } else {
                    fontdb::Weight::NORMAL
                },
                stretch: fontdb::Stretch::Normal,
                style: if variant.is_italic() {
                    fontdb::Style::Italic
                } else {
                    fontdb::Style::Normal
                },
            };
            let id = db
                .query(&query)
                .ok_or_else(|| FontError::SystemFontNotFound(family.to_string()))?;
            let data = db
                .with_face_data(id, |data, _index| data.to_vec())
                .ok_or_else(|| FontError::SystemFontNotFound(family.to_string()))?;
            let face = TrueTypeFont::parse(variant, Arc::new(data))?;
            faces.insert(variant, Arc::new(FontFace::TrueType(face)));
        }
        Ok(Self { faces })
    }

    pub fn face(&self, variant: FontVariant) -> &Arc<FontFace> {
        // Every constructor fills all four variants.
        &self.faces[&variant]
    }

    /// Faces in variant order; the same `Arc` may appear more than once.
    pub fn faces(&self) -> impl Iterator<Item = (FontVariant, &Arc<FontFace>)> {
        self.faces.iter().map(|(variant, face)| (*variant, face))
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl TextMeasure for FontLibrary {
    fn width_of(&self, text: &str, variant: FontVariant, size: f32) -> f32 {
        self.face(variant).width_of(text, size)
    }
}
