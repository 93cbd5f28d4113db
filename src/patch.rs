use crate::Error;
use std::fmt;
use tracing::warn;

/// Label used for the source side of generated patches.
pub const ORIGINAL_LABEL: &str = "original_tour_plan.txt";
/// Label used for the target side of generated patches.
pub const MODIFIED_LABEL: &str = "modified_tour_plan.txt";

/// A single tagged line within a hunk.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Line added to the target document.
    Add(String),
    /// Line removed from the source document.
    Remove(String),
    /// Line present in both documents, anchoring the hunk.
    Context(String),
}

impl Operation {
    pub(crate) fn to_char(&self) -> char {
        match self {
            Operation::Add(_) => '+',
            Operation::Remove(_) => '-',
            Operation::Context(_) => ' ',
        }
    }

    pub(crate) fn line(&self) -> &str {
        match self {
            Operation::Add(line) => line,
            Operation::Remove(line) => line,
            Operation::Context(line) => line,
        }
    }
}

/// One localized change region of a patch.
///
/// Starts are 0-based cursor positions internally; `Display` renders them
/// 1-based the way unified diffs are written.
#[derive(Debug, Clone, PartialEq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    pub operations: Vec<Operation>,
}

/// A parsed or generated patch for a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub old_file: String,
    pub new_file: String,
    pub hunks: Vec<Hunk>,
}

impl Patch {
    /// Parse unified-diff text into a patch.
    ///
    /// The accepted dialect is deliberately wider than what [`Patch`]'s own
    /// `Display` emits, because the diffs this system receives come from an
    /// unreliable upstream generator: the `diff` preamble and the `---`/`+++`
    /// file headers are optional (a bare `---` with no label is fine), git
    /// metadata lines are skipped, `\ No newline at end of file` markers are
    /// ignored, and a data line without a marker character is taken as
    /// context. If the text contains more than one file section, only the
    /// first is read. Empty input parses to an empty patch.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut lines: Vec<&str> = content.split('\n').collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }

        let mut old_file = None;
        let mut new_file = None;
        let mut hunks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].strip_suffix('\r').unwrap_or(lines[i]);

            if line.trim().is_empty() {
                i += 1;
                continue;
            }

            if line.starts_with("diff ") || line.starts_with("---") {
                if !hunks.is_empty() {
                    // A second file section starts here. This engine patches a
                    // single document, so the rest of the text is ignored.
                    break;
                }
                if let Some(label) = line.strip_prefix("--- ") {
                    old_file = Some(strip_git_prefix(label, "a/").to_string());
                }
                i += 1;
                continue;
            }

            if line.starts_with("+++") {
                if let Some(label) = line.strip_prefix("+++ ") {
                    new_file = Some(strip_git_prefix(label, "b/").to_string());
                }
                i += 1;
                continue;
            }

            if line.starts_with('\\') || is_git_metadata(line) {
                i += 1;
                continue;
            }

            if line.starts_with("@@") {
                let (hunk, next) = parse_hunk(&lines, i)?;
                hunks.push(hunk);
                i = next;
                continue;
            }

            return Err(Error::InvalidPatchFormat(format!(
                "unexpected line outside any hunk: '{}'",
                line
            )));
        }

        Ok(Patch {
            old_file: old_file.unwrap_or_else(|| ORIGINAL_LABEL.to_string()),
            new_file: new_file.unwrap_or_else(|| MODIFIED_LABEL.to_string()),
            hunks,
        })
    }
}

fn strip_git_prefix<'a>(label: &'a str, prefix: &str) -> &'a str {
    label.strip_prefix(prefix).unwrap_or(label)
}

fn is_git_metadata(line: &str) -> bool {
    const PREFIXES: &[&str] = &[
        "index ",
        "new file mode",
        "deleted file mode",
        "old mode",
        "new mode",
        "similarity index",
        "rename from",
        "rename to",
    ];
    PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Parse one hunk starting at `lines[i]` (the `@@` header). Returns the hunk
/// and the index of the first line after its body.
fn parse_hunk(lines: &[&str], mut i: usize) -> Result<(Hunk, usize), Error> {
    let header = lines[i].strip_suffix('\r').unwrap_or(lines[i]);
    let (old_start, old_lines, new_start, new_lines) = parse_hunk_header(header)?;
    i += 1;

    let mut operations = Vec::new();
    let mut remaining_old = old_lines;
    let mut remaining_new = new_lines;

    while i < lines.len() && (remaining_old > 0 || remaining_new > 0) {
        let line = lines[i];

        if line.starts_with("@@") {
            break;
        }

        if line.is_empty() || line == "\r" {
            // The upstream generator joins already-terminated lines with a
            // newline, leaving a blank line after every data line. Blanks
            // inside a hunk body are padding, not content; an empty context
            // line in well-formed input is a single space.
            i += 1;
            continue;
        }

        if line.starts_with('\\') {
            // "\ No newline at end of file" annotates the preceding line.
            i += 1;
            continue;
        }

        if let Some(content) = line.strip_prefix('+') {
            operations.push(Operation::Add(content.to_string()));
            remaining_new = remaining_new.saturating_sub(1);
        } else if let Some(content) = line.strip_prefix('-') {
            operations.push(Operation::Remove(content.to_string()));
            remaining_old = remaining_old.saturating_sub(1);
        } else if let Some(content) = line.strip_prefix(' ') {
            operations.push(Operation::Context(content.to_string()));
            remaining_old = remaining_old.saturating_sub(1);
            remaining_new = remaining_new.saturating_sub(1);
        } else {
            warn!("line without a marker treated as context: '{}'", line);
            operations.push(Operation::Context(line.to_string()));
            remaining_old = remaining_old.saturating_sub(1);
            remaining_new = remaining_new.saturating_sub(1);
        }

        i += 1;
    }

    if remaining_old > 0 || remaining_new > 0 {
        return Err(Error::InvalidPatchFormat(format!(
            "hunk body ends early: {} source and {} target lines still declared",
            remaining_old, remaining_new
        )));
    }

    Ok((
        Hunk {
            old_start,
            old_lines,
            new_start,
            new_lines,
            operations,
        },
        i,
    ))
}

/// Parse `@@ -a,b +c,d @@` into `(old_start, old_lines, new_start, new_lines)`
/// with 0-based starts. Single-number ranges (`-a` for `-a,1`) and trailing
/// section text after the closing `@@` are accepted; a missing closing `@@`
/// is tolerated.
fn parse_hunk_header(header: &str) -> Result<(usize, usize, usize, usize), Error> {
    let invalid = || Error::InvalidHunkHeader {
        header: header.to_string(),
    };

    let rest = header.strip_prefix("@@").ok_or_else(invalid)?;
    let ranges = &rest[..rest.find("@@").unwrap_or(rest.len())];

    let mut old_range = None;
    let mut new_range = None;

    for part in ranges.split_whitespace() {
        if let Some(range) = part.strip_prefix('-') {
            old_range = Some(range);
        } else if let Some(range) = part.strip_prefix('+') {
            new_range = Some(range);
        }
    }

    let (old_start, old_lines) = parse_range(old_range.ok_or_else(invalid)?, "old")?;
    let (new_start, new_lines) = parse_range(new_range.ok_or_else(invalid)?, "new")?;

    Ok((
        zero_based(old_start, old_lines),
        old_lines,
        zero_based(new_start, new_lines),
        new_lines,
    ))
}

fn parse_range(range: &str, side: &str) -> Result<(usize, usize), Error> {
    match range.split_once(',') {
        Some((start, lines)) => Ok((
            parse_number(start, side, "start")?,
            parse_number(lines, side, "lines")?,
        )),
        None => Ok((parse_number(range, side, "start")?, 1)),
    }
}

fn parse_number(value: &str, side: &str, field: &str) -> Result<usize, Error> {
    value
        .parse::<usize>()
        .map_err(|source| Error::InvalidNumberFormat {
            value: value.to_string(),
            field: format!("{} {}", side, field),
            source,
        })
}

/// Header starts are 1-based, except that an empty range names the line it
/// follows, which is already the 0-based insertion index.
fn zero_based(start: usize, lines: usize) -> usize {
    if lines == 0 {
        start
    } else {
        start.saturating_sub(1)
    }
}

/// Inverse of [`zero_based`], for rendering.
fn display_start(start: usize, lines: usize) -> usize {
    if lines == 0 {
        start
    } else {
        start + 1
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@@ -{},{} +{},{} @@",
            display_start(self.old_start, self.old_lines),
            self.old_lines,
            display_start(self.new_start, self.new_lines),
            self.new_lines
        )?;

        for op in &self.operations {
            let text = op.line();
            let text = text.strip_suffix('\n').unwrap_or(text);
            writeln!(f, "{}{}", op.to_char(), text)?;
        }

        Ok(())
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hunks.is_empty() {
            return Ok(());
        }

        writeln!(f, "--- {}", self.old_file)?;
        writeln!(f, "+++ {}", self.new_file)?;

        for hunk in &self.hunks {
            write!(f, "{}", hunk)?;
        }

        Ok(())
    }
}
