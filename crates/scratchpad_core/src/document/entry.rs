//! Entry vocabularies and line renderers.

use crate::security::validate_enum;
use serde::Serialize;

/// Interruption category shown in the Type column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Idea,
    Bug,
    Feature,
    Question,
    Contact,
    Refactor,
    Task,
    Note,
}

impl EntryKind {
    pub const KEYS: &'static [&'static str] = &[
        "idea", "bug", "feature", "question", "contact", "refactor", "task", "note",
    ];
    pub const DEFAULT_KEY: &'static str = "idea";

    /// Parses a caller value, falling back to `idea` for anything unknown.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        Self::from_key(validate_enum(value, Self::KEYS, Self::DEFAULT_KEY)).unwrap_or(Self::Idea)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "idea" => Some(Self::Idea),
            "bug" => Some(Self::Bug),
            "feature" => Some(Self::Feature),
            "question" => Some(Self::Question),
            "contact" => Some(Self::Contact),
            "refactor" => Some(Self::Refactor),
            "task" => Some(Self::Task),
            "note" => Some(Self::Note),
            _ => None,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Idea => "💡",
            Self::Bug => "🐛",
            Self::Feature => "✨",
            Self::Question => "❓",
            Self::Contact => "📞",
            Self::Refactor => "🔧",
            Self::Task => "📝",
            Self::Note => "📌",
        }
    }

    /// Capitalized key, e.g. `Bug`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Bug => "Bug",
            Self::Feature => "Feature",
            Self::Question => "Question",
            Self::Contact => "Contact",
            Self::Refactor => "Refactor",
            Self::Task => "Task",
            Self::Note => "Note",
        }
    }
}

/// Interruption priority shown as a colored dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const KEYS: &'static [&'static str] = &["high", "medium", "low"];
    pub const DEFAULT_KEY: &'static str = "medium";

    pub fn parse_or_default(value: Option<&str>) -> Self {
        match validate_enum(value, Self::KEYS, Self::DEFAULT_KEY) {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// ``| `HH:MM` | 🐛 Bug | note | 🔴 |``
pub fn interruption_row(time: &str, kind: EntryKind, note: &str, priority: Priority) -> String {
    format!(
        "| `{time}` | {} {} | {note} | {} |",
        kind.emoji(),
        kind.label(),
        priority.emoji()
    )
}

pub fn review_item(note: &str) -> String {
    format!("- [ ] {note}")
}

pub fn completed_item(note: &str, time: &str) -> String {
    format!("- [x] {note} ({time})")
}

pub fn archived_item(note: &str, date: &str) -> String {
    format!("- ~~{note}~~ ({date})")
}

#[cfg(test)]
mod tests {
    use super::{interruption_row, EntryKind, Priority};

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        assert_eq!(EntryKind::parse_or_default(Some("BUG")), EntryKind::Bug);
        assert_eq!(EntryKind::parse_or_default(Some("rant")), EntryKind::Idea);
        assert_eq!(EntryKind::parse_or_default(None), EntryKind::Idea);
        assert_eq!(Priority::parse_or_default(Some("Low")), Priority::Low);
        assert_eq!(Priority::parse_or_default(Some("asap")), Priority::Medium);
    }

    #[test]
    fn every_key_maps_to_a_kind() {
        for key in EntryKind::KEYS {
            let kind = EntryKind::from_key(key).expect("known key");
            assert_eq!(kind.label().to_ascii_lowercase(), *key);
        }
    }

    #[test]
    fn row_has_four_cells() {
        let row = interruption_row("10:30", EntryKind::Bug, "Fix bug", Priority::High);
        assert_eq!(row, "| `10:30` | 🐛 Bug | Fix bug | 🔴 |");
    }
}
