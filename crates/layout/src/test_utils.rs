use crate::engine::{LayoutSettings, TextMeasure};
use tagpress_types::{Color, FontVariant};

/// Monospace stand-in metrics: every char is `advance` em wide, bold adds 10%.
pub struct FixedAdvance {
    pub advance: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn width_of(&self, text: &str, variant: FontVariant, size: f32) -> f32 {
        let factor = if variant.is_bold() { 1.1 } else { 1.0 };
        text.chars().count() as f32 * self.advance * size * factor
    }
}

/// A4 page, 14pt text, 24pt lines, 50pt top/left margins.
pub fn settings() -> LayoutSettings {
    LayoutSettings {
        base_font_size: 14.0,
        line_height: 24.0,
        left_margin: 50.0,
        top_margin: 50.0,
        page_height: 842.0,
        default_color: Color::BLACK,
    }
}
