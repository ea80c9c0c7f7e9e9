//! Inline markup compiler.
//!
//! Turns one line of tagged text such as `<b>Hi</b> <24>Big</24>` into a flat
//! list of [`TextFragment`]s, each carrying a full snapshot of the style that
//! was active when its text was collected.
//!
//! Tags are independent flags rather than a nesting stack: a close tag always
//! clears its attribute, however many opens preceded it. Bracket text that does
//! not match the grammar is kept as literal text, so compilation never fails.

mod compiler;
mod fragment;
mod state;
pub mod tags;

pub use compiler::{compile_document, compile_line, strip_tags};
pub use fragment::TextFragment;
pub use state::StyleState;
pub use tags::{MarginEdge, Tag, TagMatch, TagScanner, parse_tag, tokenize};
