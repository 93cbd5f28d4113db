use crate::lines::split_keepends;
use crate::patch::{MODIFIED_LABEL, ORIGINAL_LABEL};
use crate::{Hunk, Operation, Patch};
use similar::{Algorithm, DiffTag, TextDiff};

/// Generates the canonical unified diff between two documents.
///
/// Output is deterministic for a given pair of inputs and carries the fixed
/// labels the rest of the system expects. Identical inputs produce a patch
/// with no hunks, which renders as the empty string.
pub struct Differ {
    old: String,
    new: String,
    context_lines: usize,
}

impl Differ {
    /// Create a new Differ over the old and new document text.
    pub fn new(old: &str, new: &str) -> Self {
        Self {
            old: old.to_string(),
            new: new.to_string(),
            context_lines: 3,
        }
    }

    /// Set the number of context lines to include around each change.
    pub fn context_lines(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    /// Generate the patch.
    pub fn generate(&self) -> Patch {
        let old_lines = split_keepends(&self.old);
        let new_lines = split_keepends(&self.new);

        let diff = TextDiff::configure()
            .algorithm(Algorithm::Patience)
            .diff_lines(self.old.as_str(), self.new.as_str());

        let mut hunks = Vec::new();

        for group in diff.grouped_ops(self.context_lines) {
            let first_op = group.first().expect("grouped ops are never empty");

            let old_start = first_op.old_range().start;
            let new_start = first_op.new_range().start;

            let mut actual_old_lines = 0;
            let mut actual_new_lines = 0;
            let mut operations = Vec::new();

            for op in group {
                match op.tag() {
                    DiffTag::Equal => {
                        for i in op.old_range() {
                            operations.push(Operation::Context(old_lines[i].to_string()));
                        }
                        actual_old_lines += op.old_range().len();
                        actual_new_lines += op.new_range().len();
                    }
                    DiffTag::Delete => {
                        for i in op.old_range() {
                            operations.push(Operation::Remove(old_lines[i].to_string()));
                        }
                        actual_old_lines += op.old_range().len();
                    }
                    DiffTag::Insert => {
                        for j in op.new_range() {
                            operations.push(Operation::Add(new_lines[j].to_string()));
                        }
                        actual_new_lines += op.new_range().len();
                    }
                    DiffTag::Replace => {
                        for i in op.old_range() {
                            operations.push(Operation::Remove(old_lines[i].to_string()));
                        }
                        for j in op.new_range() {
                            operations.push(Operation::Add(new_lines[j].to_string()));
                        }
                        actual_old_lines += op.old_range().len();
                        actual_new_lines += op.new_range().len();
                    }
                }
            }

            if operations
                .iter()
                .any(|op| !matches!(op, Operation::Context(_)))
            {
                hunks.push(Hunk {
                    old_start,
                    old_lines: actual_old_lines,
                    new_start,
                    new_lines: actual_new_lines,
                    operations,
                });
            }
        }

        Patch {
            old_file: ORIGINAL_LABEL.to_string(),
            new_file: MODIFIED_LABEL.to_string(),
            hunks,
        }
    }
}
