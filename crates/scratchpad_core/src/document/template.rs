//! Fixed scratchpad template: section headers, sentinel lines, and the
//! document written by `create`.

pub const FOCUS_HEADER: &str = "## 🎯 Current Focus";
pub const INTERRUPTIONS_HEADER: &str = "## 💡 Interruptions / Ideas";
pub const REVIEW_HEADER: &str = "## 🔄 To Review Later";
pub const COMPLETED_HEADER: &str = "## ✅ Completed Today";
pub const ARCHIVED_HEADER: &str = "## 🗑️ Archived / Dismissed";
pub const STATISTICS_HEADER: &str = "## 📊 Usage Statistics";

pub const ARCHIVE_SUBSECTION_HEADER: &str = "### Old Ideas / Resolved Items";

pub const INTERRUPTIONS_SENTINEL: &str = "| _No entries yet_ | | | |";
pub const REVIEW_SENTINEL: &str = "_Empty - all caught up!_";
pub const COMPLETED_SENTINEL: &str = "_No completions yet_";
pub const ARCHIVED_SENTINEL: &str = "_Nothing archived yet_";

pub const FOCUS_IDLE_STARTED: &str = "**Started:** `--:--`  ";
pub const FOCUS_IDLE_TASK: &str = "**Task:** _No active task_";

pub const TABLE_HEADER: &str = "| Time | Type | Note | Priority |";
pub const TABLE_SEPARATOR: &str = "|------|------|------|----------|";
pub const SECTION_SEPARATOR: &str = "---";

/// Lines between the Interruptions header and the first date subsection.
pub const INTERRUPTIONS_PREAMBLE_LINES: usize = 3;
/// Lines between the Completed Today header and the first date subsection.
pub const COMPLETED_PREAMBLE_LINES: usize = 1;

/// Subsection header for one calendar date (`DD/MM/YYYY`).
pub fn date_header(date: &str) -> String {
    format!("### 📅 {date}")
}

/// Renders a fresh scratchpad dated `date`.
pub fn render_template(date: &str) -> String {
    format!(
        r#"# 📋 AI Scratchpad

A dynamic workspace for tracking tasks, ideas, and interruptions during development sessions.

---

{FOCUS_HEADER}

{FOCUS_IDLE_STARTED}
{FOCUS_IDLE_TASK}

---

{INTERRUPTIONS_HEADER}

Quick-capture zone for thoughts that pop up during focused work.

### 📅 {date}

{TABLE_HEADER}
{TABLE_SEPARATOR}
{INTERRUPTIONS_SENTINEL}

**Legend:**
- **Types:** 💡 Idea | 🐛 Bug | ✨ Feature | ❓ Question | 📞 Contact | 🔧 Refactor | 📝 Task | 📌 Note
- **Priority:** 🔴 High | 🟡 Medium | 🟢 Low

---

{REVIEW_HEADER}

Items logged during work sessions that need follow-up or consideration.

{REVIEW_SENTINEL}

---

{COMPLETED_HEADER}

### 📅 {date}

{COMPLETED_SENTINEL}

---

{ARCHIVED_HEADER}

<details>
<summary>Click to expand archived items</summary>

{ARCHIVE_SUBSECTION_HEADER}

{ARCHIVED_SENTINEL}

</details>

---

{STATISTICS_HEADER}

- **Total Ideas Logged:** 0
- **Items Completed:** 0
- **Items Archived:** 0
- **Last Updated:** {date}

---

## 🔧 Quick Reference

### Auto-logging Triggers
When these phrases are detected, items are automatically logged:
- "Remind me to..."
- "I should..."
- "Don't forget..."
- "Later I need to..."
- "Oh, I just thought of..."

### Workflow
1. **During Work:** Mention off-topic ideas → AI asks to log → Continues main task
2. **Starting Task:** Update Current Focus section
3. **Completing Items:** Move from "To Review Later" to "Completed Today"
4. **Dismissing Items:** Move to "Archived / Dismissed"

---

_Last session: {date} at --:--_
"#
    )
}
