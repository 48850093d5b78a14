//! Tool-call gateway.
//!
//! # Responsibility
//! - Map named tool calls with JSON arguments onto service operations.
//! - Apply the rate limiter before any other work.
//! - Turn every failure into a caller-safe response and log the detail.
//!
//! # Invariants
//! - Calls are serialized: one read -> edit -> write cycle at a time.
//! - Failures never escape as `Err`; callers always get a `ToolResponse`.
//! - Caller-visible failure text comes only from `ScratchpadError::user_message`.

use crate::clock::{Clock, SystemClock};
use crate::config::ScratchpadConfig;
use crate::error::{ScratchpadError, ScratchpadResult};
use crate::logging::sanitize_message;
use crate::security::RateLimiter;
use crate::service::{
    CreatedDocument, DocumentLocation, FocusReceipt, ItemReceipt, LogReceipt, ScratchpadService,
};
use crate::store::{DocumentStore, FsDocumentStore};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

pub const TOOL_READ: &str = "scratchpad_read";
pub const TOOL_CREATE: &str = "scratchpad_create";
pub const TOOL_LOG_INTERRUPTION: &str = "scratchpad_log_interruption";
pub const TOOL_UPDATE_FOCUS: &str = "scratchpad_update_focus";
pub const TOOL_FIND: &str = "scratchpad_find";
pub const TOOL_ADD_TO_REVIEW_LATER: &str = "scratchpad_add_to_review_later";
pub const TOOL_MARK_COMPLETED: &str = "scratchpad_mark_completed";
pub const TOOL_ARCHIVE_ITEM: &str = "scratchpad_archive_item";

const SUPPORTED_TOOLS: &[&str] = &[
    TOOL_READ,
    TOOL_CREATE,
    TOOL_LOG_INTERRUPTION,
    TOOL_UPDATE_FOCUS,
    TOOL_FIND,
    TOOL_ADD_TO_REVIEW_LATER,
    TOOL_MARK_COMPLETED,
    TOOL_ARCHIVE_ITEM,
];
const MAX_LOGGED_DETAIL_CHARS: usize = 200;
const MAX_LOGGED_TOOL_CHARS: usize = 64;

/// Returns every tool name the gateway routes.
pub fn supported_tools() -> &'static [&'static str] {
    SUPPORTED_TOOLS
}

/// One parsed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    Read,
    Create {
        location: Option<String>,
    },
    LogInterruption {
        note: String,
        kind: Option<String>,
        priority: Option<String>,
    },
    UpdateFocus {
        task: String,
    },
    Find,
    AddToReviewLater {
        note: String,
    },
    MarkCompleted {
        note: String,
    },
    ArchiveItem {
        note: String,
    },
}

impl ToolRequest {
    /// Parses `arguments` for `tool`.
    ///
    /// Enum-valued arguments that are missing or not strings are passed on as
    /// `None` and later fall back to their defaults.
    ///
    /// # Errors
    /// - `InvalidInput` for an unknown tool, a missing or empty required
    ///   argument, or a required argument that is not a string.
    pub fn parse(tool: &str, arguments: &Value) -> ScratchpadResult<Self> {
        match tool {
            TOOL_READ => Ok(Self::Read),
            TOOL_FIND => Ok(Self::Find),
            TOOL_CREATE => Ok(Self::Create {
                location: optional_string(arguments, "location", "Location")?,
            }),
            TOOL_LOG_INTERRUPTION => Ok(Self::LogInterruption {
                note: required_string(arguments, "note", "Note")?,
                kind: lenient_string(arguments, "type"),
                priority: lenient_string(arguments, "priority"),
            }),
            TOOL_UPDATE_FOCUS => Ok(Self::UpdateFocus {
                task: required_string(arguments, "task", "Task")?,
            }),
            TOOL_ADD_TO_REVIEW_LATER => Ok(Self::AddToReviewLater {
                note: required_string(arguments, "note", "Note")?,
            }),
            TOOL_MARK_COMPLETED => Ok(Self::MarkCompleted {
                note: required_string(arguments, "note", "Note")?,
            }),
            TOOL_ARCHIVE_ITEM => Ok(Self::ArchiveItem {
                note: required_string(arguments, "note", "Note")?,
            }),
            other => Err(ScratchpadError::InvalidInput(format!(
                "Unknown tool: {}",
                sanitize_message(other, MAX_LOGGED_TOOL_CHARS)
            ))),
        }
    }
}

/// Successful operation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "output", rename_all = "snake_case")]
pub enum ToolOutput {
    Document { content: String },
    Created(CreatedDocument),
    Located(DocumentLocation),
    Logged(LogReceipt),
    FocusUpdated(FocusReceipt),
    Queued(ItemReceipt),
    Completed(ItemReceipt),
    Archived(ItemReceipt),
}

/// Envelope returned for every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResponse {
    pub call_id: Uuid,
    pub ok: bool,
    /// Present when `ok`.
    pub output: Option<ToolOutput>,
    /// Caller-safe failure message; empty when `ok`.
    pub message: String,
}

impl ToolResponse {
    fn success(call_id: Uuid, output: ToolOutput) -> Self {
        Self {
            call_id,
            ok: true,
            output: Some(output),
            message: String::new(),
        }
    }

    fn failure(call_id: Uuid, err: &ScratchpadError) -> Self {
        Self {
            call_id,
            ok: false,
            output: None,
            message: err.user_message(),
        }
    }
}

struct GatewayState<S: DocumentStore, C: Clock> {
    service: ScratchpadService<S, C>,
    limiter: RateLimiter,
}

/// Single entry point owning the service and the rate limiter.
pub struct Gateway<S: DocumentStore, C: Clock> {
    state: Mutex<GatewayState<S, C>>,
}

impl Gateway<FsDocumentStore, SystemClock> {
    /// Builds a filesystem-backed gateway for `workspace`.
    pub fn open(workspace: &Path, config: &ScratchpadConfig) -> ScratchpadResult<Self> {
        config.validate()?;
        let store = FsDocumentStore::open(workspace, config)?;
        info!(
            "event=gateway_open module=gateway status=ok workspace={} max_requests={} window_secs={}",
            store.workspace().display(),
            config.max_requests,
            config.rate_window_secs
        );
        Ok(Self::new(
            ScratchpadService::new(store, SystemClock, config),
            RateLimiter::new(config.max_requests, config.rate_window()),
        ))
    }
}

impl<S: DocumentStore, C: Clock> Gateway<S, C> {
    pub fn new(service: ScratchpadService<S, C>, limiter: RateLimiter) -> Self {
        Self {
            state: Mutex::new(GatewayState { service, limiter }),
        }
    }

    /// Handles one tool call end to end.
    pub fn handle(&self, tool: &str, arguments: &Value) -> ToolResponse {
        let call_id = Uuid::new_v4();
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = &mut *guard;
        let tool_label = sanitize_message(tool, MAX_LOGGED_TOOL_CHARS);

        let outcome = state
            .limiter
            .check()
            .and_then(|()| ToolRequest::parse(tool, arguments))
            .and_then(|request| dispatch(&mut state.service, request));

        match outcome {
            Ok(output) => {
                info!(
                    "event=tool_call module=gateway status=ok tool={} call_id={}",
                    tool_label, call_id
                );
                ToolResponse::success(call_id, output)
            }
            Err(err) => {
                warn!(
                    "event=tool_call module=gateway status=error tool={} call_id={} kind={} detail={}",
                    tool_label,
                    call_id,
                    err.kind().as_str(),
                    sanitize_message(&err.to_string(), MAX_LOGGED_DETAIL_CHARS)
                );
                ToolResponse::failure(call_id, &err)
            }
        }
    }
}

fn dispatch<S: DocumentStore, C: Clock>(
    service: &mut ScratchpadService<S, C>,
    request: ToolRequest,
) -> ScratchpadResult<ToolOutput> {
    match request {
        ToolRequest::Read => service
            .read()
            .map(|content| ToolOutput::Document { content }),
        ToolRequest::Create { location } => {
            service.create(location.as_deref()).map(ToolOutput::Created)
        }
        ToolRequest::Find => service.find().map(ToolOutput::Located),
        ToolRequest::LogInterruption {
            note,
            kind,
            priority,
        } => service
            .log_interruption(&note, kind.as_deref(), priority.as_deref())
            .map(ToolOutput::Logged),
        ToolRequest::UpdateFocus { task } => {
            service.update_focus(&task).map(ToolOutput::FocusUpdated)
        }
        ToolRequest::AddToReviewLater { note } => {
            service.add_to_review_later(&note).map(ToolOutput::Queued)
        }
        ToolRequest::MarkCompleted { note } => {
            service.mark_completed(&note).map(ToolOutput::Completed)
        }
        ToolRequest::ArchiveItem { note } => service.archive_item(&note).map(ToolOutput::Archived),
    }
}

fn required_string(arguments: &Value, key: &str, label: &str) -> ScratchpadResult<String> {
    match arguments.get(key) {
        None | Some(Value::Null) => Err(required(label)),
        Some(Value::String(value)) if value.trim().is_empty() => Err(required(label)),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ScratchpadError::InvalidInput(format!(
            "{label} must be a string"
        ))),
    }
}

fn optional_string(arguments: &Value, key: &str, label: &str) -> ScratchpadResult<Option<String>> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ScratchpadError::InvalidInput(format!(
            "{label} must be a string"
        ))),
    }
}

fn lenient_string(arguments: &Value, key: &str) -> Option<String> {
    arguments.get(key).and_then(Value::as_str).map(str::to_string)
}

fn required(label: &str) -> ScratchpadError {
    ScratchpadError::InvalidInput(format!("{label} is required"))
}

#[cfg(test)]
mod tests {
    use super::{ToolRequest, TOOL_CREATE, TOOL_LOG_INTERRUPTION, TOOL_UPDATE_FOCUS};
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn parses_log_interruption_with_lenient_enums() {
        let request = ToolRequest::parse(
            TOOL_LOG_INTERRUPTION,
            &json!({"note": "Fix bug", "type": 7, "priority": "HIGH"}),
        )
        .expect("valid call");
        assert_eq!(
            request,
            ToolRequest::LogInterruption {
                note: "Fix bug".to_string(),
                kind: None,
                priority: Some("HIGH".to_string()),
            }
        );
    }

    #[test]
    fn missing_or_blank_required_argument_is_invalid_input() {
        for args in [json!({}), json!({"task": "   "}), json!(null)] {
            let err = ToolRequest::parse(TOOL_UPDATE_FOCUS, &args).expect_err("task required");
            assert_eq!(err.user_message(), "Task is required");
        }
    }

    #[test]
    fn non_string_required_argument_is_rejected() {
        let err = ToolRequest::parse(TOOL_LOG_INTERRUPTION, &json!({"note": ["a"]}))
            .expect_err("array note");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.user_message(), "Note must be a string");
    }

    #[test]
    fn create_location_is_optional() {
        assert_eq!(
            ToolRequest::parse(TOOL_CREATE, &json!({})).expect("no location"),
            ToolRequest::Create { location: None }
        );
        assert!(ToolRequest::parse(TOOL_CREATE, &json!({"location": 3})).is_err());
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let err = ToolRequest::parse("scratchpad_delete", &json!({})).expect_err("unknown");
        assert_eq!(err.user_message(), "Unknown tool: scratchpad_delete");
    }
}
