use log::debug;
use tagpress_markup::TextFragment;
use tagpress_types::{Color, FontVariant};

/// Source of text widths for layout.
///
/// The advance of a fragment must come from the same face and size that the
/// renderer will draw it with.
pub trait TextMeasure {
    fn width_of(&self, text: &str, variant: FontVariant, size: f32) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn width_of(&self, text: &str, variant: FontVariant, size: f32) -> f32 {
        (**self).width_of(text, variant, size)
    }
}

/// Document-level values the layout pass needs.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub base_font_size: f32,
    pub line_height: f32,
    pub left_margin: f32,
    pub top_margin: f32,
    pub page_height: f32,
    pub default_color: Color,
}

/// One positioned, fully resolved piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub variant: FontVariant,
    pub size: f32,
    pub color: Color,
}

/// The write position. `y` only ever decreases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

pub fn line_top_margin(fragments: &[TextFragment]) -> f32 {
    fragments
        .iter()
        .map(|f| f.margin.top_or_zero())
        .fold(0.0, f32::max)
}

pub fn line_bottom_margin(fragments: &[TextFragment]) -> f32 {
    fragments
        .iter()
        .map(|f| f.margin.bottom_or_zero())
        .fold(0.0, f32::max)
}

/// Stateful line-by-line layout over one document.
pub struct LineLayoutEngine<'a, M: TextMeasure + ?Sized> {
    settings: &'a LayoutSettings,
    measure: &'a M,
    cursor: Cursor,
}

impl<'a, M: TextMeasure + ?Sized> LineLayoutEngine<'a, M> {
    pub fn new(settings: &'a LayoutSettings, measure: &'a M) -> Self {
        Self {
            settings,
            measure,
            cursor: Cursor {
                x: settings.left_margin,
                y: settings.page_height - settings.top_margin,
            },
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Lays out one line, appending its commands to `out`.
    ///
    /// A line with no fragments emits nothing but still consumes
    /// `line_height` of vertical space.
    pub fn layout_line(&mut self, fragments: &[TextFragment], out: &mut Vec<PlacementCommand>) {
        self.cursor.y -= line_top_margin(fragments);
        self.cursor.x = self.settings.left_margin;

        for fragment in fragments {
            let variant = fragment.variant();
            let size = fragment.font_size.unwrap_or(self.settings.base_font_size);
            let color = fragment.color.unwrap_or(self.settings.default_color);

            if !fragment.text.is_empty() {
                out.push(PlacementCommand {
                    text: fragment.text.clone(),
                    x: self.cursor.x + fragment.margin.left_or_zero(),
                    y: self.cursor.y,
                    variant,
                    size,
                    color,
                });
            }

            self.cursor.x += self.measure.width_of(&fragment.text, variant, size)
                + fragment.margin.right_or_zero();
        }

        self.cursor.y -= self.settings.line_height + line_bottom_margin(fragments);
    }
}

/// Positions every fragment of every line.
///
/// Deterministic single pass with no wrapping: fragments that run past the
/// page edge are placed anyway.
pub fn layout_document<M: TextMeasure + ?Sized>(
    lines: &[Vec<TextFragment>],
    settings: &LayoutSettings,
    measure: &M,
) -> Vec<PlacementCommand> {
    let mut engine = LineLayoutEngine::new(settings, measure);
    let mut commands = Vec::with_capacity(lines.iter().map(Vec::len).sum());
    for line in lines {
        engine.layout_line(line, &mut commands);
    }
    debug!(
        "Laid out {} line(s) into {} placement(s), final y = {:.2}",
        lines.len(),
        commands.len(),
        engine.cursor().y
    );
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FixedAdvance, settings};
    use tagpress_markup::{compile_document, compile_line};
    use tagpress_types::EdgeMargins;

    #[test]
    fn first_line_starts_below_top_margin() {
        let measure = FixedAdvance::default();
        let commands = layout_document(&[compile_line("hello")], &settings(), &measure);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].x, 50.0);
        assert_eq!(commands[0].y, 842.0 - 50.0);
        assert_eq!(commands[0].size, 14.0);
        assert_eq!(commands[0].variant, FontVariant::Normal);
        assert_eq!(commands[0].color, Color::BLACK);
    }

    #[test]
    fn bold_and_size_scenario_advances_left_to_right() {
        let measure = FixedAdvance::default();
        let lines = vec![compile_line("<b>Hi</b> <24>Big</24>")];
        let commands = layout_document(&lines, &settings(), &measure);

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].variant, FontVariant::Bold);
        assert_eq!(commands[2].size, 24.0);
        assert!(commands[0].x < commands[1].x && commands[1].x < commands[2].x);
        assert!(commands.iter().all(|c| c.y == commands[0].y));
    }

    #[test]
    fn horizontal_advance_uses_width_and_margins() {
        let measure = FixedAdvance::default();
        let lines = vec![compile_line("<i><mr3>ab</m><ml7><30>cd")];
        let commands = layout_document(&lines, &settings(), &measure);

        let f1_width = measure.width_of("ab", FontVariant::Italic, 14.0);
        assert_eq!(commands[1].x, commands[0].x + f1_width + 3.0 + 7.0);
        assert_eq!(commands[1].variant, FontVariant::Italic);
    }

    #[test]
    fn fragment_color_falls_back_to_default() {
        let measure = FixedAdvance::default();
        let mut layout = settings();
        layout.default_color = Color::gray(80);
        let commands = layout_document(&[compile_line("<#FF0000>Red</#>Normal")], &layout, &measure);
        assert_eq!(commands[0].color, Color::rgb(255, 0, 0));
        assert_eq!(commands[1].color, Color::gray(80));
    }

    #[test]
    fn empty_line_advances_exactly_one_line_height() {
        let measure = FixedAdvance::default();
        let lines = compile_document("first\n\nthird");
        let commands = layout_document(&lines, &settings(), &measure);

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].y - commands[1].y, 2.0 * settings().line_height);
    }

    #[test]
    fn vertical_margins_take_the_line_maximum() {
        let measure = FixedAdvance::default();
        let lines = compile_document("<mt4>a<mt9>b<mb6>c\nnext");
        let layout = settings();
        let mut engine = LineLayoutEngine::new(&layout, &measure);
        let start = engine.cursor().y;
        let mut out = Vec::new();

        engine.layout_line(&lines[0], &mut out);
        assert!(out.iter().all(|c| c.y == start - 9.0));
        assert_eq!(engine.cursor().y, start - 9.0 - settings().line_height - 6.0);
    }

    #[test]
    fn line_starts_strictly_decrease() {
        let measure = FixedAdvance::default();
        let lines = compile_document("a\n\n<mb5>b\n<mt2>c\n");
        let layout = settings();
        let mut engine = LineLayoutEngine::new(&layout, &measure);
        let mut out = Vec::new();
        let mut starts = Vec::new();
        for line in &lines {
            starts.push(engine.cursor().y);
            engine.layout_line(line, &mut out);
        }
        assert!(starts.windows(2).all(|w| w[1] < w[0]), "{starts:?}");
    }

    #[test]
    fn layout_is_deterministic() {
        let measure = FixedAdvance::default();
        let lines = compile_document("<b>x</b><ml4>y\n<mt3><#00FF00>z");
        let first = layout_document(&lines, &settings(), &measure);
        let second = layout_document(&lines, &settings(), &measure);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_fragment_text_emits_nothing_but_still_advances_by_margin() {
        let measure = FixedAdvance::default();
        let empty = TextFragment {
            margin: EdgeMargins { right: Some(12.0), ..Default::default() },
            ..TextFragment::plain("")
        };
        let line = vec![empty, TextFragment::plain("x")];
        let commands = layout_document(&[line], &settings(), &measure);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].x, 50.0 + 12.0);
    }

    #[test]
    fn text_past_the_page_edge_is_still_placed() {
        let measure = FixedAdvance::default();
        let long = "w".repeat(500);
        let commands = layout_document(&[compile_line(&format!("{long}<b>tail"))], &settings(), &measure);
        assert_eq!(commands.len(), 2);
        assert!(commands[1].x > 595.0);
    }

    #[test]
    fn line_margin_helpers_ignore_missing_edges() {
        assert_eq!(line_top_margin(&[]), 0.0);
        assert_eq!(line_bottom_margin(&compile_line("<mb3>a</m>b")), 3.0);
    }
}
