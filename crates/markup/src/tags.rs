//! Lexer for the inline tag grammar.
//!
//! | Form | Tag |
//! |---|---|
//! | `<b>` / `</b>` | [`Tag::Bold`] |
//! | `<i>` / `</i>` | [`Tag::Italic`] |
//! | `<N>` / `</N>` | [`Tag::FontSize`] |
//! | `<#RRGGBB>` / `</#>` | [`Tag::Color`] |
//! | `<mtN>` `<mbN>` `<mlN>` `<mrN>` | [`Tag::Margin`] |
//! | `</m>` | [`Tag::MarginReset`] |

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::{char, digit1};
use nom::combinator::{map, map_res, value};
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use tagpress_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginEdge {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Bold { open: bool },
    Italic { open: bool },
    /// The value of a closing `</N>` is kept but carries no meaning.
    FontSize { points: u32, open: bool },
    /// `Some` for `<#RRGGBB>`, `None` for `</#>`.
    Color { rgb: Option<Color> },
    Margin { edge: MarginEdge, value: u32 },
    MarginReset,
}

/// A recognized tag and the byte range `[start, end)` it occupies in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch {
    pub tag: Tag,
    pub start: usize,
    pub end: usize,
}

// --- Helper Parsers ---

// Digit runs that overflow u32 fail here, leaving the bracket literal.
fn parse_number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>()).parse(input)
}

fn parse_hex_color(input: &str) -> IResult<&str, Color> {
    map_res(
        take_while_m_n(6, 6, |c: char| c.is_ascii_hexdigit()),
        Color::from_hex_digits,
    )
    .parse(input)
}

fn parse_margin_edge(input: &str) -> IResult<&str, MarginEdge> {
    alt((
        value(MarginEdge::Top, char('t')),
        value(MarginEdge::Bottom, char('b')),
        value(MarginEdge::Left, char('l')),
        value(MarginEdge::Right, char('r')),
    ))
    .parse(input)
}

// --- Tag Parsers ---

fn parse_open_tag(input: &str) -> IResult<&str, Tag> {
    delimited(
        char('<'),
        alt((
            value(Tag::Bold { open: true }, char('b')),
            value(Tag::Italic { open: true }, char('i')),
            map(parse_number, |points| Tag::FontSize { points, open: true }),
            map(preceded(char('#'), parse_hex_color), |rgb| Tag::Color {
                rgb: Some(rgb),
            }),
            map(
                preceded(char('m'), pair(parse_margin_edge, parse_number)),
                |(edge, value)| Tag::Margin { edge, value },
            ),
        )),
        char('>'),
    )
    .parse(input)
}

fn parse_close_tag(input: &str) -> IResult<&str, Tag> {
    delimited(
        tag("</"),
        alt((
            value(Tag::Bold { open: false }, char('b')),
            value(Tag::Italic { open: false }, char('i')),
            map(parse_number, |points| Tag::FontSize { points, open: false }),
            value(Tag::Color { rgb: None }, char('#')),
            value(Tag::MarginReset, char('m')),
        )),
        char('>'),
    )
    .parse(input)
}

/// Parses exactly one tag at the start of `input`.
pub fn parse_tag(input: &str) -> IResult<&str, Tag> {
    alt((parse_close_tag, parse_open_tag)).parse(input)
}

/// Iterator over the tags of a line, left to right and non-overlapping.
///
/// At every `<` the grammar is tried; on failure the bracket is literal text
/// and the scan resumes one byte later.
#[derive(Debug, Clone)]
pub struct TagScanner<'a> {
    line: &'a str,
    offset: usize,
}

impl<'a> TagScanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, offset: 0 }
    }
}

impl Iterator for TagScanner<'_> {
    type Item = TagMatch;

    fn next(&mut self) -> Option<TagMatch> {
        while let Some(relative) = self.line[self.offset..].find('<') {
            let start = self.offset + relative;
            match parse_tag(&self.line[start..]) {
                Ok((rest, tag)) => {
                    let end = self.line.len() - rest.len();
                    self.offset = end;
                    return Some(TagMatch { tag, start, end });
                }
                // '<' is a single byte, so start + 1 stays on a char boundary.
                Err(_) => self.offset = start + 1,
            }
        }
        self.offset = self.line.len();
        None
    }
}

pub fn tokenize(line: &str) -> Vec<TagMatch> {
    TagScanner::new(line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(line: &str) -> Vec<Tag> {
        tokenize(line).into_iter().map(|m| m.tag).collect()
    }

    #[test]
    fn recognizes_every_form() {
        assert_eq!(
            tags("<b></b><i></i><12></12><#A0b1C2></#><mt4><mb5><ml6><mr7></m>"),
            vec![
                Tag::Bold { open: true },
                Tag::Bold { open: false },
                Tag::Italic { open: true },
                Tag::Italic { open: false },
                Tag::FontSize { points: 12, open: true },
                Tag::FontSize { points: 12, open: false },
                Tag::Color { rgb: Some(Color::rgb(0xA0, 0xB1, 0xC2)) },
                Tag::Color { rgb: None },
                Tag::Margin { edge: MarginEdge::Top, value: 4 },
                Tag::Margin { edge: MarginEdge::Bottom, value: 5 },
                Tag::Margin { edge: MarginEdge::Left, value: 6 },
                Tag::Margin { edge: MarginEdge::Right, value: 7 },
                Tag::MarginReset,
            ]
        );
    }

    #[test]
    fn reports_byte_spans() {
        let matches = tokenize("ab<b>cd</b>");
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].start, matches[0].end), (2, 5));
        assert_eq!((matches[1].start, matches[1].end), (7, 11));
    }

    #[test]
    fn rejects_shapes_outside_the_grammar() {
        for literal in [
            "<B>", "<I>", "<bold>", "< b>", "<b >", "<#FFF>", "<#FFFFFFF>", "<#GGGGGG>",
            "<m>", "<mx4>", "<mt>", "<mt-4>", "<12.5>", "<-3>", "</>", "</ b>", "</#FF0000>",
            "</mt4>", "<>", "<", "a < b",
        ] {
            assert!(tokenize(literal).is_empty(), "{literal:?} should be literal text");
        }
    }

    #[test]
    fn resumes_after_a_failed_bracket() {
        let matches = tokenize("<<b>>");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tag, Tag::Bold { open: true });
        assert_eq!((matches[0].start, matches[0].end), (1, 4));
    }

    #[test]
    fn handles_multibyte_text_around_tags() {
        let line = "é<b>ü</b>…<";
        let matches = tokenize(line);
        assert_eq!(matches.len(), 2);
        assert_eq!(&line[matches[0].start..matches[0].end], "<b>");
        assert_eq!(&line[matches[1].start..matches[1].end], "</b>");
    }

    #[test]
    fn oversized_numbers_stay_literal() {
        let huge = "9".repeat(45);
        for literal in [
            format!("<{huge}>"),
            format!("</{huge}>"),
            format!("<mt{huge}>"),
            "<4294967296>".to_string(),
        ] {
            assert!(tokenize(&literal).is_empty(), "{literal:?} should be literal text");
        }
        assert_eq!(
            tags("<4294967295>"),
            vec![Tag::FontSize { points: u32::MAX, open: true }]
        );
    }

    #[test]
    fn numbers_are_exact_integers() {
        assert_eq!(
            tags("<16777217><mb16777217>"),
            vec![
                Tag::FontSize { points: 16_777_217, open: true },
                Tag::Margin { edge: MarginEdge::Bottom, value: 16_777_217 },
            ]
        );
    }

    #[test]
    fn parse_tag_leaves_the_rest() {
        let (rest, tag) = parse_tag("<ml10>tail").unwrap();
        assert_eq!(rest, "tail");
        assert_eq!(tag, Tag::Margin { edge: MarginEdge::Left, value: 10 });
        assert!(parse_tag("x<b>").is_err());
    }
}
