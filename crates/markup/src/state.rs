use crate::fragment::TextFragment;
use crate::tags::{MarginEdge, Tag};
use tagpress_types::{Color, EdgeMargins};

/// The running style of a line, updated tag by tag from left to right.
///
/// Close tags clear their attribute outright; there is no per-attribute
/// stack, so `<12><18>x</12>` leaves the size unset rather than back at 12.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleState {
    pub bold: bool,
    pub italic: bool,
    pub font_size: Option<f32>,
    pub color: Option<Color>,
    pub margin: EdgeMargins,
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, tag: &Tag) {
        match *tag {
            Tag::Bold { open } => self.bold = open,
            Tag::Italic { open } => self.italic = open,
            Tag::FontSize { points, open } => {
                self.font_size = open.then_some(points as f32);
            }
            Tag::Color { rgb } => self.color = rgb,
            Tag::Margin { edge, value } => {
                let slot = match edge {
                    MarginEdge::Top => &mut self.margin.top,
                    MarginEdge::Bottom => &mut self.margin.bottom,
                    MarginEdge::Left => &mut self.margin.left,
                    MarginEdge::Right => &mut self.margin.right,
                };
                *slot = Some(value as f32);
            }
            Tag::MarginReset => self.margin.clear(),
        }
    }

    /// Copies the current style onto a new fragment holding `text`.
    pub fn snapshot(&self, text: &str) -> TextFragment {
        TextFragment {
            text: text.to_string(),
            bold: self.bold,
            italic: self.italic,
            font_size: self.font_size,
            color: self.color,
            margin: self.margin,
        }
    }
}
