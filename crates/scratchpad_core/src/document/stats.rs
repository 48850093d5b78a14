//! Derived Usage Statistics block.
//!
//! The four statistics lines are a pure function of the other sections and
//! the current date; recomputing twice yields identical lines.

use crate::document::locator::{is_table_row, DocumentIndex, SectionId, Span};
use crate::document::template::{INTERRUPTIONS_SENTINEL, TABLE_HEADER};
use crate::error::{ScratchpadError, ScratchpadResult};
use serde::Serialize;

/// Counters shown in Usage Statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub logged: usize,
    pub completed: usize,
    pub archived: usize,
}

impl Statistics {
    /// Counts entries in the sections of an already scanned document.
    pub fn collect(lines: &[String], index: &DocumentIndex) -> Self {
        Self {
            logged: count_lines(lines, index, SectionId::Interruptions, |line| {
                let trimmed = line.trim();
                is_table_row(trimmed)
                    && trimmed != TABLE_HEADER
                    && trimmed != INTERRUPTIONS_SENTINEL
            }),
            completed: count_lines(lines, index, SectionId::Completed, |line| {
                let trimmed = line.trim_start();
                trimmed.starts_with("- [x]") || trimmed.starts_with("- [X]")
            }),
            archived: count_lines(lines, index, SectionId::Archived, |line| {
                line.trim_start().starts_with("- ~~")
            }),
        }
    }
}

fn count_lines(
    lines: &[String],
    index: &DocumentIndex,
    id: SectionId,
    matches: impl Fn(&str) -> bool,
) -> usize {
    index
        .section(id)
        .map(|span| span.body().filter(|&n| matches(&lines[n])).count())
        .unwrap_or(0)
}

/// Rewrites the four statistics lines from the current content.
///
/// # Errors
/// - `MissingSection` when Usage Statistics is absent or too short to hold
///   its four lines.
pub fn recompute_statistics(lines: &mut [String], today: &str) -> ScratchpadResult<Statistics> {
    let index = DocumentIndex::scan(lines);
    let block = index.require(SectionId::Statistics)?;
    ensure_block_fits(block)?;

    let stats = Statistics::collect(lines, &index);
    lines[block.header + 2] = format!("- **Total Ideas Logged:** {}", stats.logged);
    lines[block.header + 3] = format!("- **Items Completed:** {}", stats.completed);
    lines[block.header + 4] = format!("- **Items Archived:** {}", stats.archived);
    lines[block.header + 5] = format!("- **Last Updated:** {today}");
    Ok(stats)
}

fn ensure_block_fits(block: Span) -> ScratchpadResult<()> {
    if block.header + 5 >= block.end {
        return Err(ScratchpadError::MissingSection(
            SectionId::Statistics.display_name(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{recompute_statistics, Statistics};
    use crate::document::locator::DocumentIndex;
    use crate::document::template::render_template;
    use crate::error::ErrorKind;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn fresh_template_counts_nothing() {
        let doc = lines(&render_template("01/01/2026"));
        let stats = Statistics::collect(&doc, &DocumentIndex::scan(&doc));
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn counts_rows_checked_items_and_struck_items() {
        let text = render_template("01/01/2026")
            .replace(
                "| _No entries yet_ | | | |",
                "| `10:00` | 💡 Idea | a | 🟡 |\n| `10:05` | 🐛 Bug | b | 🔴 |",
            )
            .replace("_No completions yet_", "- [x] done (11:00)\n- [ ] open")
            .replace("_Nothing archived yet_", "- ~~old~~ (01/01/2026)");
        let mut doc = lines(&text);
        let stats = recompute_statistics(&mut doc, "02/01/2026").expect("recompute");
        assert_eq!(
            stats,
            Statistics {
                logged: 2,
                completed: 1,
                archived: 1
            }
        );
        let joined = doc.join("\n");
        assert!(joined.contains("- **Total Ideas Logged:** 2\n- **Items Completed:** 1\n- **Items Archived:** 1\n- **Last Updated:** 02/01/2026"));
    }

    #[test]
    fn truncated_block_is_missing_section() {
        let mut doc = lines("## 📊 Usage Statistics\n\n- **Total Ideas Logged:** 0");
        let err = recompute_statistics(&mut doc, "01/01/2026").expect_err("too short");
        assert_eq!(err.kind(), ErrorKind::MissingSection);
    }
}
