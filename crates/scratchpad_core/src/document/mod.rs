//! Scratchpad document model and mutation engine.
//!
//! # Responsibility
//! - Know the fixed template: headers, sentinels, line offsets.
//! - Locate sections by scanning lines and apply single-line edits.
//! - Keep the Usage Statistics block derived from the other sections.
//!
//! # Invariants
//! - The document is handled as `\n`-separated lines; splitting then joining
//!   reproduces the original bytes, so untouched lines survive exactly.
//! - This is not a markdown parser: only recognized header lines and fixed
//!   offsets below them carry meaning.

pub mod edit;
pub mod entry;
pub mod locator;
pub mod stats;
pub mod template;

pub use edit::Placement;
pub use entry::{EntryKind, Priority};
pub use locator::{DocumentIndex, SectionId, Span};
pub use stats::{recompute_statistics, Statistics};

/// Splits document text into owned lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Joins lines back into document text.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}
