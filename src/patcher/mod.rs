mod lenient;
mod salvage;
mod strict;

use crate::{Error, Patch};
use tracing::{debug, warn};

pub use lenient::LenientPatcher;
pub use salvage::extract_added_lines;
pub use strict::StrictPatcher;

/// Applies an untrusted diff with layered fallback.
///
/// Strategies run in decreasing order of fidelity: the strict applier
/// first, then the position-free lenient pass, then salvage of the added
/// lines alone. The first strategy to produce a document wins. Individual
/// strategy failures are expected with generated diffs and are only
/// logged; the caller sees an error only when every tier comes up empty.
#[derive(Clone)]
pub struct Patcher {
    diff: String,
}

impl Patcher {
    pub fn new(diff: &str) -> Self {
        Self {
            diff: diff.to_string(),
        }
    }

    /// Apply the diff to the content, falling back as needed.
    ///
    /// An empty diff is a valid no-change patch and returns the content
    /// unchanged.
    pub fn apply(&self, content: &str) -> Result<String, Error> {
        match self.apply_strict(content) {
            Ok(result) => return Ok(result),
            Err(err) => debug!("strict application failed: {}", err),
        }

        if let Some(result) = LenientPatcher::new(&self.diff).apply(content) {
            debug!("patch recovered by the lenient pass");
            return Ok(result);
        }

        if let Some(result) = extract_added_lines(&self.diff) {
            warn!("salvaging added lines only, original content is discarded");
            return Ok(result);
        }

        Err(Error::UnapplicablePatch)
    }

    fn apply_strict(&self, content: &str) -> Result<String, Error> {
        let patch = Patch::parse(&self.diff)?;
        StrictPatcher::new(&patch).apply(content)
    }
}
