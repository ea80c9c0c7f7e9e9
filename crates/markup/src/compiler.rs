use crate::fragment::TextFragment;
use crate::state::StyleState;
use crate::tags::TagScanner;
use log::debug;

/// Compiles one line of markup into styled fragments.
///
/// Text between tags becomes a fragment styled by the state *before* the next
/// tag; the tail after the last tag takes the final state. Empty stretches
/// produce no fragment, so an empty line yields an empty vector.
pub fn compile_line(line: &str) -> Vec<TextFragment> {
    let mut state = StyleState::new();
    let mut fragments = Vec::new();
    let mut last_index = 0;

    for found in TagScanner::new(line) {
        if found.start > last_index {
            fragments.push(state.snapshot(&line[last_index..found.start]));
        }
        state.apply(&found.tag);
        last_index = found.end;
    }

    if last_index < line.len() {
        fragments.push(state.snapshot(&line[last_index..]));
    }

    fragments
}

/// Compiles a `\n`-separated document, one fresh style state per line.
///
/// A trailing `\r` on a line is dropped so CRLF input lays out the same as LF.
pub fn compile_document(text: &str) -> Vec<Vec<TextFragment>> {
    let lines: Vec<Vec<TextFragment>> = text
        .split('\n')
        .map(|line| compile_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect();
    debug!(
        "Compiled {} line(s) into {} fragment(s)",
        lines.len(),
        lines.iter().map(Vec::len).sum::<usize>()
    );
    lines
}

/// The text of a line with every recognized tag removed.
pub fn strip_tags(line: &str) -> String {
    compile_line(line).into_iter().map(|f| f.text).collect()
}
