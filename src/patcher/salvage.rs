use crate::lines::ensure_newline;

/// Collect the added lines of a diff as a whole replacement document.
///
/// Every line carrying the add marker, `+++` file headers excepted, has the
/// marker stripped and is kept in order; everything else in the diff and
/// the entire original content are discarded. Returns `None` when the diff
/// adds nothing. This is the destructive last resort of the fallback chain.
pub fn extract_added_lines(diff: &str) -> Option<String> {
    let mut result = String::new();
    let mut found = false;

    for raw in diff.split('\n') {
        if raw.starts_with("+++") {
            continue;
        }
        if let Some(added) = raw.strip_prefix('+') {
            result.push_str(&ensure_newline(added));
            found = true;
        }
    }

    found.then_some(result)
}
