//! In-place line edits for each document operation.
//!
//! # Responsibility
//! - Locate the anchor section, then replace a sentinel or insert a new line
//!   at the position the template dictates.
//!
//! # Invariants
//! - A missing anchor fails with `MissingSection` before any line changes.
//! - Lines outside the touched position are never rewritten.
//! - Date subsections are created only inside an existing parent section.
//! - Sentinels are matched as whole trimmed lines; every inserted item
//!   carries a prefix (`|`, `- [ ]`, `- [x]`, `- ~~`) so it can never equal one.

use crate::document::entry::{archived_item, completed_item, review_item};
use crate::document::locator::{
    find_exact, is_table_separator, last_line_with_prefix, last_table_row, next_separator,
    DocumentIndex, SectionId,
};
use crate::document::template::{
    date_header, ARCHIVED_SENTINEL, ARCHIVE_SUBSECTION_HEADER, COMPLETED_PREAMBLE_LINES,
    COMPLETED_SENTINEL, INTERRUPTIONS_PREAMBLE_LINES, INTERRUPTIONS_SENTINEL, REVIEW_SENTINEL,
    TABLE_HEADER, TABLE_SEPARATOR,
};
use crate::error::{ScratchpadError, ScratchpadResult};
use serde::Serialize;

const COMPLETED_PREFIXES: &[&str] = &["- [x]", "- [X]", "- [ ]"];
const ARCHIVED_PREFIXES: &[&str] = &["- ~~"];

/// Where a new entry landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Overwrote the empty-state placeholder.
    ReplacedSentinel,
    /// Inserted after existing entries.
    Inserted,
    /// Created today's date subsection first.
    CreatedSubsection,
}

/// Adds `row` to today's table under Interruptions / Ideas.
pub fn insert_interruption(
    lines: &mut Vec<String>,
    date: &str,
    row: String,
) -> ScratchpadResult<Placement> {
    let index = DocumentIndex::scan(lines);
    let parent = index.require(SectionId::Interruptions)?;
    let header = date_header(date);

    let Some(today) = index.subsection(SectionId::Interruptions, &header) else {
        let at = (parent.header + INTERRUPTIONS_PREAMBLE_LINES).min(lines.len());
        splice(
            lines,
            at,
            [
                String::new(),
                header,
                String::new(),
                TABLE_HEADER.to_string(),
                TABLE_SEPARATOR.to_string(),
                row,
            ],
        );
        return Ok(Placement::CreatedSubsection);
    };

    if let Some(sentinel) = find_exact(lines, today.body(), INTERRUPTIONS_SENTINEL) {
        lines[sentinel] = row;
        return Ok(Placement::ReplacedSentinel);
    }
    match last_table_row(lines, today.body()) {
        Some(last) => {
            // A bare header row still owns the alignment row below it.
            let mut at = last + 1;
            if at < today.end && is_table_separator(&lines[at]) {
                at += 1;
            }
            lines.insert(at, row);
        }
        None => splice(
            lines,
            today.header + 1,
            [
                String::new(),
                TABLE_HEADER.to_string(),
                TABLE_SEPARATOR.to_string(),
                row,
            ],
        ),
    }
    Ok(Placement::Inserted)
}

/// Overwrites the start-time and task lines of Current Focus.
pub fn replace_focus(lines: &mut [String], time: &str, task: &str) -> ScratchpadResult<()> {
    let index = DocumentIndex::scan(lines);
    let focus = index.require(SectionId::Focus)?;
    let started_line = focus.header + 2;
    let task_line = focus.header + 3;
    if task_line >= focus.end {
        return Err(ScratchpadError::MissingSection(
            SectionId::Focus.display_name(),
        ));
    }

    lines[started_line] = format!("**Started:** `{time}`  ");
    lines[task_line] = format!("**Task:** {task}");
    Ok(())
}

/// Adds an unchecked item to To Review Later.
pub fn insert_review_item(lines: &mut Vec<String>, note: &str) -> ScratchpadResult<Placement> {
    let index = DocumentIndex::scan(lines);
    let review = index.require(SectionId::Review)?;
    let item = review_item(note);

    if let Some(sentinel) = find_exact(lines, review.body(), REVIEW_SENTINEL) {
        lines[sentinel] = item;
        return Ok(Placement::ReplacedSentinel);
    }

    let mut at = next_separator(lines, review.body()).unwrap_or(review.end);
    while at > review.header + 1 && lines[at - 1].trim().is_empty() {
        at -= 1;
    }
    lines.insert(at, item);
    Ok(Placement::Inserted)
}

/// Adds a checked item to today's Completed Today subsection.
pub fn insert_completed_item(
    lines: &mut Vec<String>,
    date: &str,
    time: &str,
    note: &str,
) -> ScratchpadResult<Placement> {
    let index = DocumentIndex::scan(lines);
    let parent = index.require(SectionId::Completed)?;
    let header = date_header(date);
    let item = completed_item(note, time);

    let Some(today) = index.subsection(SectionId::Completed, &header) else {
        let at = (parent.header + COMPLETED_PREAMBLE_LINES).min(lines.len());
        splice(lines, at, [String::new(), header, String::new(), item]);
        return Ok(Placement::CreatedSubsection);
    };

    Ok(replace_or_append(
        lines,
        today.header,
        today.body(),
        COMPLETED_SENTINEL,
        COMPLETED_PREFIXES,
        item,
    ))
}

/// Adds a struck-through item under Archived / Old Ideas.
pub fn insert_archived_item(
    lines: &mut Vec<String>,
    date: &str,
    note: &str,
) -> ScratchpadResult<Placement> {
    let index = DocumentIndex::scan(lines);
    index.require(SectionId::Archived)?;
    let target = index
        .subsection(SectionId::Archived, ARCHIVE_SUBSECTION_HEADER)
        .ok_or(ScratchpadError::MissingSection("Old Ideas / Resolved Items"))?;
    let item = archived_item(note, date);

    Ok(replace_or_append(
        lines,
        target.header,
        target.body(),
        ARCHIVED_SENTINEL,
        ARCHIVED_PREFIXES,
        item,
    ))
}

fn replace_or_append(
    lines: &mut Vec<String>,
    header: usize,
    body: std::ops::Range<usize>,
    sentinel: &str,
    item_prefixes: &[&str],
    item: String,
) -> Placement {
    if let Some(at) = find_exact(lines, body.clone(), sentinel) {
        lines[at] = item;
        return Placement::ReplacedSentinel;
    }
    match last_line_with_prefix(lines, body, item_prefixes) {
        Some(last) => lines.insert(last + 1, item),
        None => splice(lines, header + 1, [String::new(), item]),
    }
    Placement::Inserted
}

fn splice<const N: usize>(lines: &mut Vec<String>, at: usize, new_lines: [String; N]) {
    lines.splice(at..at, new_lines);
}

#[cfg(test)]
mod tests {
    use super::{
        insert_completed_item, insert_interruption, insert_review_item, replace_focus, Placement,
    };
    use crate::document::template::render_template;
    use crate::error::ErrorKind;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn review_items_join_the_existing_list() {
        let mut doc = lines(&render_template("01/01/2026"));
        assert_eq!(
            insert_review_item(&mut doc, "first").expect("insert"),
            Placement::ReplacedSentinel
        );
        assert_eq!(
            insert_review_item(&mut doc, "second").expect("insert"),
            Placement::Inserted
        );
        let joined = doc.join("\n");
        assert!(joined.contains("- [ ] first\n- [ ] second\n\n---"));
    }

    #[test]
    fn review_insert_without_separator_lands_at_section_end() {
        let mut doc = lines("## 🔄 To Review Later\n\n- [ ] a\n\n## 📊 Usage Statistics");
        insert_review_item(&mut doc, "b").expect("insert");
        assert_eq!(doc[3], "- [ ] b");
        assert_eq!(doc[4], "");
    }

    #[test]
    fn completed_creates_new_day_above_previous_days() {
        let mut doc = lines(&render_template("01/01/2026"));
        let placement =
            insert_completed_item(&mut doc, "02/01/2026", "09:00", "ship").expect("insert");
        assert_eq!(placement, Placement::CreatedSubsection);
        let joined = doc.join("\n");
        let new_day = joined.find("### 📅 02/01/2026").expect("new day");
        let old_day = joined.rfind("### 📅 01/01/2026").expect("old day");
        assert!(new_day < old_day);
        assert!(joined.contains("### 📅 02/01/2026\n\n- [x] ship (09:00)\n\n### 📅 01/01/2026"));
    }

    #[test]
    fn interruption_row_lands_below_alignment_row_of_empty_table() {
        let text = render_template("01/01/2026").replace("| _No entries yet_ | | | |\n", "");
        let mut doc = lines(&text);
        let first = "| `10:00` | 💡 Idea | x | 🟡 |".to_string();
        let second = "| `10:05` | 🐛 Bug | y | 🔴 |".to_string();

        assert_eq!(
            insert_interruption(&mut doc, "01/01/2026", first).expect("insert"),
            Placement::Inserted
        );
        insert_interruption(&mut doc, "01/01/2026", second).expect("insert");

        let joined = doc.join("\n");
        assert!(joined.contains(
            "| Time | Type | Note | Priority |\n\
             |------|------|------|----------|\n\
             | `10:00` | 💡 Idea | x | 🟡 |\n\
             | `10:05` | 🐛 Bug | y | 🔴 |\n"
        ));
    }

    #[test]
    fn focus_fails_when_section_is_truncated() {
        let mut doc = lines("## 🎯 Current Focus\n");
        let err = replace_focus(&mut doc, "10:00", "x").expect_err("too short");
        assert_eq!(err.kind(), ErrorKind::MissingSection);
    }
}
