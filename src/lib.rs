//! Unified-diff generation and fault-tolerant patch application for tour
//! plan documents edited by an unreliable text generator.
//!
//! [`Differ`] produces the canonical diff between two versions of a plan.
//! [`Patcher`] applies incoming diff text with a three-tier fallback chain:
//! exact application, a position-free lenient pass, then salvage of the
//! added lines alone. Use [`StrictPatcher`] directly when a dirty patch
//! must fail instead of degrade.

use thiserror::Error;

mod differ;
mod lines;
mod patch;
mod patcher;

pub use differ::Differ;
pub use patch::{Hunk, Operation, Patch};
pub use patcher::{extract_added_lines, LenientPatcher, Patcher, StrictPatcher};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid patch format: {0}")]
    InvalidPatchFormat(String),

    #[error("Could not parse hunk header: {header}")]
    InvalidHunkHeader { header: String },

    #[error("Could not parse number '{value}' for {field}: {source}")]
    InvalidNumberFormat {
        value: String,
        field: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Hunk starting at line {hunk_start} overlaps content already consumed up to line {position}")]
    HunkOverlap { hunk_start: usize, position: usize },

    #[error("Context mismatch at line {line}: expected '{expected}', found '{found}'")]
    ContextMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("Removed line mismatch at line {line}: expected '{expected}', found '{found}'")]
    RemovalMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("No strategy could apply the patch")]
    UnapplicablePatch,
}
