use crate::lines::{ensure_newline, split_keepends, trim_terminator};
use tracing::debug;

/// Re-applies a diff by content rather than by position.
///
/// Hunk headers and line counts are ignored entirely. The diff is replayed
/// as a flat sequence of tagged lines against a cursor into the document:
/// a removed line deletes its first match at or after the cursor, an added
/// line is inserted at the cursor, and a context line advances the cursor
/// past its first match. This recovers patches whose positions have
/// drifted, at the cost of first-match ambiguity on repeated lines.
pub struct LenientPatcher<'a> {
    diff: &'a str,
}

impl<'a> LenientPatcher<'a> {
    pub fn new(diff: &'a str) -> Self {
        Self { diff }
    }

    /// Apply the diff to the content.
    ///
    /// Returns `None` when the pass never engaged with the document: no
    /// removal matched and no insertion was anchored by a matched context
    /// line. A diff that is nothing but additions is left for the salvage
    /// tier, which owns that interpretation.
    pub fn apply(&self, content: &str) -> Option<String> {
        let mut output: Vec<String> = split_keepends(content)
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut cursor = 0;
        let mut removals = 0;
        let mut insertions = 0;
        let mut anchors = 0;

        for raw in self.diff.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            if line.is_empty() || is_header(line) {
                continue;
            }

            if let Some(removed) = raw.strip_prefix('-') {
                match find_from(&output, cursor, removed) {
                    Some(index) => {
                        output.remove(index);
                        cursor = index;
                        removals += 1;
                    }
                    None => debug!("no line matches removal '{}'", trim_terminator(removed)),
                }
            } else if let Some(added) = raw.strip_prefix('+') {
                output.insert(cursor, ensure_newline(added));
                cursor += 1;
                insertions += 1;
            } else {
                let text = raw.strip_prefix(' ').unwrap_or(raw);
                match find_from(&output, cursor, text) {
                    Some(index) => {
                        cursor = index + 1;
                        anchors += 1;
                    }
                    None => debug!("no line matches context '{}'", trim_terminator(text)),
                }
            }
        }

        if removals > 0 || (insertions > 0 && anchors > 0) {
            Some(output.concat())
        } else {
            None
        }
    }
}

/// File headers, hunk headers and markers carry no document content.
fn is_header(line: &str) -> bool {
    line.starts_with("---")
        || line.starts_with("+++")
        || line.starts_with("@@")
        || line.starts_with("diff ")
        || line.starts_with('\\')
}

fn find_from(lines: &[String], from: usize, needle: &str) -> Option<usize> {
    let target = trim_terminator(needle);
    let from = from.min(lines.len());
    lines[from..]
        .iter()
        .position(|line| trim_terminator(line) == target)
        .map(|offset| from + offset)
}
