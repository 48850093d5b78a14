//! Line-scan section locator.
//!
//! # Responsibility
//! - Find recognized top-level sections and their `###` subsections in one
//!   forward pass over the document lines.
//! - Provide range helpers for sentinel lines, table rows and list items.
//!
//! # Invariants
//! - A line belongs to the nearest preceding `## ` header; an unrecognized
//!   `## ` header closes the open section.
//! - Only the first occurrence of a recognized header opens its section.
//! - Indexes are rebuilt per operation; nothing is cached between calls.

use crate::document::template::{
    ARCHIVED_HEADER, COMPLETED_HEADER, FOCUS_HEADER, INTERRUPTIONS_HEADER, REVIEW_HEADER,
    SECTION_SEPARATOR, STATISTICS_HEADER,
};
use crate::error::{ScratchpadError, ScratchpadResult};
use std::ops::Range;

const TOP_LEVEL_PREFIX: &str = "## ";
const SUBSECTION_PREFIX: &str = "### ";

/// Recognized top-level sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Focus,
    Interruptions,
    Review,
    Completed,
    Archived,
    Statistics,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        Self::Focus,
        Self::Interruptions,
        Self::Review,
        Self::Completed,
        Self::Archived,
        Self::Statistics,
    ];

    /// Exact header line opening this section.
    pub fn header(self) -> &'static str {
        match self {
            Self::Focus => FOCUS_HEADER,
            Self::Interruptions => INTERRUPTIONS_HEADER,
            Self::Review => REVIEW_HEADER,
            Self::Completed => COMPLETED_HEADER,
            Self::Archived => ARCHIVED_HEADER,
            Self::Statistics => STATISTICS_HEADER,
        }
    }

    /// Name used in `MissingSection` messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Focus => "Current Focus",
            Self::Interruptions => "Interruptions",
            Self::Review => "To Review Later",
            Self::Completed => "Completed Today",
            Self::Archived => "Archived",
            Self::Statistics => "Usage Statistics",
        }
    }

    fn from_header(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.header() == line)
    }
}

/// Header position and exclusive end of one section or subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub header: usize,
    pub end: usize,
}

impl Span {
    /// Lines after the header, up to the end.
    pub fn body(&self) -> Range<usize> {
        self.header + 1..self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Subsection {
    parent: SectionId,
    title: String,
    span: Span,
}

/// Section boundaries found by one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    sections: Vec<(SectionId, Span)>,
    subsections: Vec<Subsection>,
}

impl DocumentIndex {
    pub fn scan(lines: &[String]) -> Self {
        let mut index = Self::default();
        let mut open_section: Option<(SectionId, usize)> = None;
        let mut open_subsection: Option<(SectionId, String, usize)> = None;

        for (line_no, raw) in lines.iter().enumerate() {
            let line = raw.trim_end();

            if line.starts_with(TOP_LEVEL_PREFIX) {
                index.close_subsection(open_subsection.take(), line_no);
                index.close_section(open_section.take(), line_no);
                open_section = SectionId::from_header(line)
                    .filter(|id| index.section(*id).is_none())
                    .map(|id| (id, line_no));
                continue;
            }

            if line.starts_with(SUBSECTION_PREFIX) {
                index.close_subsection(open_subsection.take(), line_no);
                open_subsection = open_section.map(|(id, _)| (id, line.to_string(), line_no));
            }
        }

        index.close_subsection(open_subsection, lines.len());
        index.close_section(open_section, lines.len());
        index
    }

    fn close_section(&mut self, open: Option<(SectionId, usize)>, end: usize) {
        if let Some((id, header)) = open {
            self.sections.push((id, Span { header, end }));
        }
    }

    fn close_subsection(&mut self, open: Option<(SectionId, String, usize)>, end: usize) {
        if let Some((parent, title, header)) = open {
            self.subsections.push(Subsection {
                parent,
                title,
                span: Span { header, end },
            });
        }
    }

    pub fn section(&self, id: SectionId) -> Option<Span> {
        self.sections
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, span)| *span)
    }

    /// Like [`Self::section`], failing with `MissingSection`.
    pub fn require(&self, id: SectionId) -> ScratchpadResult<Span> {
        self.section(id)
            .ok_or(ScratchpadError::MissingSection(id.display_name()))
    }

    /// First `###` subsection of `parent` whose header equals `header`.
    pub fn subsection(&self, parent: SectionId, header: &str) -> Option<Span> {
        self.subsections
            .iter()
            .find(|sub| sub.parent == parent && sub.title == header)
            .map(|sub| sub.span)
    }
}

/// First line in `range` equal to `target` after trimming.
pub fn find_exact(lines: &[String], range: Range<usize>, target: &str) -> Option<usize> {
    range
        .into_iter()
        .find(|&line_no| lines[line_no].trim() == target)
}

/// Last markdown table row in `range`, skipping separator rows.
pub fn last_table_row(lines: &[String], range: Range<usize>) -> Option<usize> {
    range
        .into_iter()
        .rev()
        .find(|&line_no| is_table_row(&lines[line_no]))
}

/// Last line in `range` whose trimmed start begins with any of `prefixes`.
pub fn last_line_with_prefix(
    lines: &[String],
    range: Range<usize>,
    prefixes: &[&str],
) -> Option<usize> {
    range.into_iter().rev().find(|&line_no| {
        let line = lines[line_no].trim_start();
        prefixes.iter().any(|prefix| line.starts_with(prefix))
    })
}

/// First `---` separator line in `range`.
pub fn next_separator(lines: &[String], range: Range<usize>) -> Option<usize> {
    find_exact(lines, range, SECTION_SEPARATOR)
}

/// A `|`-led line that is not an alignment row.
pub fn is_table_row(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('|') && !is_table_separator(line)
}

/// A `|---|` alignment row.
pub fn is_table_separator(line: &str) -> bool {
    line.contains('-')
        && line
            .chars()
            .all(|ch| matches!(ch, '|' | '-' | ':' | ' ' | '\t'))
}

#[cfg(test)]
mod tests {
    use super::{
        find_exact, is_table_row, last_line_with_prefix, last_table_row, next_separator,
        DocumentIndex, SectionId, Span,
    };
    use crate::document::template::{date_header, render_template};
    use crate::error::ErrorKind;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn scan_finds_every_template_section() {
        let doc = lines(&render_template("05/05/2026"));
        let index = DocumentIndex::scan(&doc);
        for id in SectionId::ALL {
            let span = index.section(id).expect("section present");
            assert_eq!(doc[span.header], id.header());
            assert!(span.end > span.header);
        }
    }

    #[test]
    fn sections_end_at_next_top_level_header_including_unknown_ones() {
        let doc = lines("## 📊 Usage Statistics\nbody\n## 🔧 Quick Reference\nmore");
        let index = DocumentIndex::scan(&doc);
        assert_eq!(
            index.section(SectionId::Statistics),
            Some(Span { header: 0, end: 2 })
        );
    }

    #[test]
    fn date_subsections_are_attributed_to_their_parent() {
        let doc = lines(&render_template("05/05/2026"));
        let index = DocumentIndex::scan(&doc);
        let header = date_header("05/05/2026");
        let ideas = index
            .subsection(SectionId::Interruptions, &header)
            .expect("ideas date subsection");
        let done = index
            .subsection(SectionId::Completed, &header)
            .expect("completed date subsection");
        assert_ne!(ideas.header, done.header);
        assert!(index.subsection(SectionId::Review, &header).is_none());
    }

    #[test]
    fn duplicate_header_keeps_first_occurrence() {
        let doc = lines("## 🎯 Current Focus\na\n## 🎯 Current Focus\nb");
        let index = DocumentIndex::scan(&doc);
        assert_eq!(
            index.section(SectionId::Focus),
            Some(Span { header: 0, end: 2 })
        );
    }

    #[test]
    fn headers_tolerate_trailing_whitespace_only() {
        let doc = lines("## 🎯 Current Focus  \r\n  ## 📊 Usage Statistics");
        let index = DocumentIndex::scan(&doc);
        assert!(index.section(SectionId::Focus).is_some());
        assert!(index.section(SectionId::Statistics).is_none());
    }

    #[test]
    fn require_reports_missing_section() {
        let index = DocumentIndex::scan(&lines("# empty"));
        let err = index.require(SectionId::Archived).expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::MissingSection);
    }

    #[test]
    fn table_helpers_skip_alignment_rows() {
        let doc = lines("| A | B |\n|---|:-:|\n| 1 | 2 |\n\ntext | pipe");
        assert!(is_table_row(&doc[0]));
        assert!(!is_table_row(&doc[1]));
        assert_eq!(last_table_row(&doc, 0..doc.len()), Some(2));
        assert_eq!(last_table_row(&doc, 1..2), None);
    }

    #[test]
    fn range_helpers_respect_bounds() {
        let doc = lines("- [x] a\n---\n- [x] b\n---");
        assert_eq!(next_separator(&doc, 0..doc.len()), Some(1));
        assert_eq!(next_separator(&doc, 2..doc.len()), Some(3));
        assert_eq!(last_line_with_prefix(&doc, 0..2, &["- [x]"]), Some(0));
        assert_eq!(find_exact(&doc, 0..doc.len(), "- [x] b"), Some(2));
    }
}
