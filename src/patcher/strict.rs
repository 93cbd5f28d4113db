use crate::lines::{ensure_newline, split_keepends, trim_terminator};
use crate::{Error, Operation, Patch};

/// Applies a parsed patch exactly as declared.
///
/// Hunks are walked strictly left to right and every context and removal
/// line is verified against the document before the result is built, so a
/// patch whose positions or content have drifted fails instead of silently
/// corrupting the document.
pub struct StrictPatcher<'a> {
    patch: &'a Patch,
}

impl<'a> StrictPatcher<'a> {
    pub fn new(patch: &'a Patch) -> Self {
        Self { patch }
    }

    /// Apply the patch to the content.
    ///
    /// A patch with no hunks returns the content unchanged. Comparison of
    /// context and removed lines ignores trailing terminators only; added
    /// lines are normalized to end with a newline.
    pub fn apply(&self, content: &str) -> Result<String, Error> {
        let lines = split_keepends(content);
        let mut result = String::with_capacity(content.len());
        let mut cursor = 0;

        for hunk in &self.patch.hunks {
            if hunk.old_start < cursor {
                return Err(Error::HunkOverlap {
                    hunk_start: hunk.old_start + 1,
                    position: cursor + 1,
                });
            }

            // Copy untouched lines up to the hunk. A start past the end of
            // the document only fails once an operation asks for a line.
            while cursor < hunk.old_start && cursor < lines.len() {
                result.push_str(lines[cursor]);
                cursor += 1;
            }

            for op in &hunk.operations {
                match op {
                    Operation::Context(expected) => {
                        if cursor >= lines.len() {
                            return Err(end_of_document(cursor, expected));
                        }

                        let actual = lines[cursor];
                        if trim_terminator(actual) != trim_terminator(expected) {
                            return Err(Error::ContextMismatch {
                                line: cursor + 1,
                                expected: trim_terminator(expected).to_string(),
                                found: trim_terminator(actual).to_string(),
                            });
                        }

                        result.push_str(actual);
                        cursor += 1;
                    }
                    Operation::Remove(expected) => {
                        if cursor >= lines.len() {
                            return Err(end_of_document(cursor, expected));
                        }

                        let actual = lines[cursor];
                        if trim_terminator(actual) != trim_terminator(expected) {
                            return Err(Error::RemovalMismatch {
                                line: cursor + 1,
                                expected: trim_terminator(expected).to_string(),
                                found: trim_terminator(actual).to_string(),
                            });
                        }

                        cursor += 1;
                    }
                    Operation::Add(text) => {
                        result.push_str(&ensure_newline(text));
                    }
                }
            }
        }

        // Copy whatever the hunks did not touch, terminators intact.
        for line in &lines[cursor..] {
            result.push_str(line);
        }

        Ok(result)
    }
}

/// The cursor ran past the last line of the document.
fn end_of_document(cursor: usize, expected: &str) -> Error {
    Error::ContextMismatch {
        line: cursor + 1,
        expected: trim_terminator(expected).to_string(),
        found: "<end of document>".to_string(),
    }
}
