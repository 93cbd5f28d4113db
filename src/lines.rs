//! Line handling shared by the differ and the patch appliers.
//!
//! Documents are handled as sequences of lines that keep their own
//! terminators, so concatenating the lines reconstructs the input exactly.

/// Split text into lines, each keeping its trailing terminator.
///
/// The last line has no terminator when the input does not end with one.
/// Empty input yields no lines.
pub(crate) fn split_keepends(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Strip trailing terminator characters for content comparison.
///
/// Only `\n` and `\r` at the end of the line are removed. Interior
/// whitespace is significant and left alone.
pub(crate) fn trim_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Normalize a line to end with a newline terminator.
pub(crate) fn ensure_newline(line: &str) -> String {
    if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{}\n", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keepends_reconstructs_input() {
        let text = "09:00 Breakfast\n10:00 Museum\nno terminator";
        let lines = split_keepends(text);
        assert_eq!(lines, vec!["09:00 Breakfast\n", "10:00 Museum\n", "no terminator"]);
        assert_eq!(lines.concat(), text);
    }

    #[test]
    fn test_split_keepends_empty() {
        assert!(split_keepends("").is_empty());
    }

    #[test]
    fn test_split_keepends_crlf() {
        let lines = split_keepends("a\r\nb\r\n");
        assert_eq!(lines, vec!["a\r\n", "b\r\n"]);
    }

    #[test]
    fn test_trim_terminator() {
        assert_eq!(trim_terminator("line\n"), "line");
        assert_eq!(trim_terminator("line\r\n"), "line");
        assert_eq!(trim_terminator("line"), "line");
        assert_eq!(trim_terminator("line  \n"), "line  ");
        assert_eq!(trim_terminator("\n"), "");
    }

    #[test]
    fn test_ensure_newline() {
        assert_eq!(ensure_newline("line"), "line\n");
        assert_eq!(ensure_newline("line\n"), "line\n");
        assert_eq!(ensure_newline("line\r"), "line\r\n");
        assert_eq!(ensure_newline(""), "\n");
    }
}
