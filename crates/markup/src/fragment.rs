use tagpress_types::{Color, EdgeMargins, FontVariant};

/// A contiguous run of text sharing one resolved style snapshot.
///
/// Fragments are created by the compiler and never mutated afterwards.
/// Unset fields (`None`) fall back to document defaults at layout time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub font_size: Option<f32>,
    pub color: Option<Color>,
    pub margin: EdgeMargins,
}

impl TextFragment {
    /// An unstyled fragment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn variant(&self) -> FontVariant {
        FontVariant::from_flags(self.bold, self.italic)
    }
}
