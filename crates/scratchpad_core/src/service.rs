//! Scratchpad use-case service.
//!
//! # Responsibility
//! - Run each operation as sanitize -> read -> locate -> edit -> write.
//! - Refresh the derived statistics after every content mutation.
//!
//! # Invariants
//! - A failed edit never reaches `write`, so the file stays untouched.
//! - Statistics refresh failures are logged and swallowed; they never turn a
//!   completed primary write into an error.
//! - Logs carry metadata only, never note or task text.

use crate::clock::{Clock, Stamp};
use crate::config::ScratchpadConfig;
use crate::document::edit::{
    insert_archived_item, insert_completed_item, insert_interruption, insert_review_item,
    replace_focus,
};
use crate::document::entry::interruption_row;
use crate::document::template::render_template;
use crate::document::{join_lines, recompute_statistics, split_lines, EntryKind, Placement, Priority};
use crate::error::ScratchpadResult;
use crate::logging::sanitize_message;
use crate::security::sanitize_text;
use crate::store::{relative_display, DocumentStore};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

const MAX_LOGGED_ERROR_CHARS: usize = 200;

/// Result of `log_interruption`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogReceipt {
    pub time: String,
    pub date: String,
    pub kind: EntryKind,
    pub priority: Priority,
    pub note: String,
    pub placement: Placement,
}

/// Result of `update_focus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusReceipt {
    pub time: String,
    pub task: String,
}

/// Result of the checklist operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReceipt {
    pub note: String,
    /// Time (completed) or date (queued, archived) written next to the item.
    pub stamp: String,
    pub placement: Placement,
}

/// Result of `create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedDocument {
    pub path: PathBuf,
    /// Workspace-relative location.
    pub location: String,
}

/// Result of `find`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLocation {
    pub path: PathBuf,
    pub location: String,
    pub exists: bool,
}

/// Mutation engine over one document store.
pub struct ScratchpadService<S: DocumentStore, C: Clock> {
    store: S,
    clock: C,
    max_note_length: usize,
    max_task_length: usize,
    default_location: String,
}

impl<S: DocumentStore, C: Clock> ScratchpadService<S, C> {
    pub fn new(store: S, clock: C, config: &ScratchpadConfig) -> Self {
        Self {
            store,
            clock,
            max_note_length: config.max_note_length,
            max_task_length: config.max_task_length,
            default_location: config.default_location.clone(),
        }
    }

    /// Returns the full document text.
    pub fn read(&mut self) -> ScratchpadResult<String> {
        self.store.read()
    }

    /// Creates a fresh document at `location` (default location when `None`).
    pub fn create(&mut self, location: Option<&str>) -> ScratchpadResult<CreatedDocument> {
        let location = location
            .unwrap_or(self.default_location.as_str())
            .to_string();
        let stamp = Stamp::now(&self.clock);
        let path = self
            .store
            .create(&location, &render_template(&stamp.date))?;
        Ok(CreatedDocument {
            location: relative_display(self.store.workspace(), &path),
            path,
        })
    }

    /// Reports the current document, or the default location when none exists.
    pub fn find(&mut self) -> ScratchpadResult<DocumentLocation> {
        let workspace = self.store.workspace().to_path_buf();
        let (path, exists) = match self.store.locate()? {
            Some(path) => (path, true),
            None => (workspace.join(&self.default_location), false),
        };
        Ok(DocumentLocation {
            location: relative_display(&workspace, &path),
            path,
            exists,
        })
    }

    /// Adds one row to today's Interruptions / Ideas table.
    pub fn log_interruption(
        &mut self,
        note: &str,
        kind: Option<&str>,
        priority: Option<&str>,
    ) -> ScratchpadResult<LogReceipt> {
        let note = sanitize_text(note, self.max_note_length, false)?;
        let kind = EntryKind::parse_or_default(kind);
        let priority = Priority::parse_or_default(priority);
        let stamp = Stamp::now(&self.clock);

        let row = interruption_row(&stamp.time, kind, &note, priority);
        let placement = self.apply(|lines| insert_interruption(lines, &stamp.date, row))?;
        info!(
            "event=interruption_logged module=service status=ok kind={} priority={} placement={:?} note_chars={}",
            kind.label(),
            priority.label(),
            placement,
            note.chars().count()
        );
        self.refresh_statistics();

        Ok(LogReceipt {
            time: stamp.time,
            date: stamp.date,
            kind,
            priority,
            note,
            placement,
        })
    }

    /// Replaces the Current Focus start time and task.
    pub fn update_focus(&mut self, task: &str) -> ScratchpadResult<FocusReceipt> {
        let task = sanitize_text(task, self.max_task_length, false)?;
        let stamp = Stamp::now(&self.clock);

        self.apply(|lines| replace_focus(lines, &stamp.time, &task))?;
        info!(
            "event=focus_updated module=service status=ok task_chars={}",
            task.chars().count()
        );
        self.refresh_statistics();

        Ok(FocusReceipt {
            time: stamp.time,
            task,
        })
    }

    /// Queues a note under To Review Later.
    pub fn add_to_review_later(&mut self, note: &str) -> ScratchpadResult<ItemReceipt> {
        let note = sanitize_text(note, self.max_note_length, false)?;
        let stamp = Stamp::now(&self.clock);

        let placement = self.apply(|lines| insert_review_item(lines, &note))?;
        info!(
            "event=review_queued module=service status=ok placement={:?}",
            placement
        );
        self.refresh_statistics();

        Ok(ItemReceipt {
            note,
            stamp: stamp.date,
            placement,
        })
    }

    /// Records a completed item under today's Completed Today subsection.
    pub fn mark_completed(&mut self, note: &str) -> ScratchpadResult<ItemReceipt> {
        let note = sanitize_text(note, self.max_note_length, false)?;
        let stamp = Stamp::now(&self.clock);

        let placement =
            self.apply(|lines| insert_completed_item(lines, &stamp.date, &stamp.time, &note))?;
        info!(
            "event=item_completed module=service status=ok placement={:?}",
            placement
        );
        self.refresh_statistics();

        Ok(ItemReceipt {
            note,
            stamp: stamp.time,
            placement,
        })
    }

    /// Moves a note into Archived / Old Ideas.
    pub fn archive_item(&mut self, note: &str) -> ScratchpadResult<ItemReceipt> {
        let note = sanitize_text(note, self.max_note_length, false)?;
        let stamp = Stamp::now(&self.clock);

        let placement = self.apply(|lines| insert_archived_item(lines, &stamp.date, &note))?;
        info!(
            "event=item_archived module=service status=ok placement={:?}",
            placement
        );
        self.refresh_statistics();

        Ok(ItemReceipt {
            note,
            stamp: stamp.date,
            placement,
        })
    }

    fn apply<T>(
        &mut self,
        edit: impl FnOnce(&mut Vec<String>) -> ScratchpadResult<T>,
    ) -> ScratchpadResult<T> {
        let content = self.store.read()?;
        let mut lines = split_lines(&content);
        let outcome = edit(&mut lines)?;
        self.store.write(&join_lines(&lines))?;
        Ok(outcome)
    }

    fn refresh_statistics(&mut self) {
        if let Err(err) = self.try_refresh_statistics() {
            warn!(
                "event=statistics_refresh module=service status=error kind={} detail={}",
                err.kind().as_str(),
                sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
            );
        }
    }

    fn try_refresh_statistics(&mut self) -> ScratchpadResult<()> {
        let today = Stamp::now(&self.clock).date;
        let content = self.store.read()?;
        let mut lines = split_lines(&content);
        recompute_statistics(&mut lines, &today)?;
        let refreshed = join_lines(&lines);
        if refreshed != content {
            self.store.write(&refreshed)?;
        }
        Ok(())
    }
}
