//! Tool catalog and text rendering for gateway responses.
//!
//! # Responsibility
//! - Describe every gateway tool with a JSON input schema.
//! - Render `ToolResponse` values as the text content callers read.
//!
//! # Invariants
//! - The catalog lists exactly the tools the gateway routes.
//! - Failure text is the caller-safe message only.

use scratchpad_core::config::ScratchpadConfig;
use scratchpad_core::gateway::{
    TOOL_ADD_TO_REVIEW_LATER, TOOL_ARCHIVE_ITEM, TOOL_CREATE, TOOL_FIND, TOOL_LOG_INTERRUPTION,
    TOOL_MARK_COMPLETED, TOOL_READ, TOOL_UPDATE_FOCUS,
};
use scratchpad_core::{EntryKind, Priority, ToolOutput, ToolResponse};
use serde::Serialize;
use serde_json::{json, Value};

/// One `tools/list` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: String,
    pub input_schema: Value,
}

/// Builds the tool catalog with limits taken from `config`.
pub fn tool_definitions(config: &ScratchpadConfig) -> Vec<ToolDefinition> {
    let window = config.rate_window_secs;
    let max_requests = config.max_requests;
    vec![
        ToolDefinition {
            name: TOOL_READ,
            description: format!(
                "Read the contents of the scratchpad file. Rate limited to {max_requests} requests per {window} seconds."
            ),
            input_schema: empty_schema(),
        },
        ToolDefinition {
            name: TOOL_CREATE,
            description: format!(
                "Create a new scratchpad at the specified location. Location must be in allowed directories: {}. Must have extension: {}",
                config.allowed_directories.join(", "),
                config.allowed_extensions.join(", ")
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": format!("Path for scratchpad (default: {})", config.default_location),
                        "default": config.default_location,
                        "maxLength": config.max_path_length,
                    }
                },
                "required": [],
            }),
        },
        ToolDefinition {
            name: TOOL_LOG_INTERRUPTION,
            description: format!(
                "Log an interruption, idea, bug, or task to the scratchpad. Note limited to {} characters.",
                config.max_note_length
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "note": note_property("The note/idea to log", config),
                    "type": {
                        "type": "string",
                        "description": "Type of entry",
                        "enum": EntryKind::KEYS,
                        "default": EntryKind::DEFAULT_KEY,
                    },
                    "priority": {
                        "type": "string",
                        "description": "Priority level",
                        "enum": Priority::KEYS,
                        "default": Priority::DEFAULT_KEY,
                    },
                },
                "required": ["note"],
            }),
        },
        ToolDefinition {
            name: TOOL_UPDATE_FOCUS,
            description: format!(
                "Update the current focus/task in the scratchpad. Task limited to {} characters.",
                config.max_task_length
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "task": {
                        "type": "string",
                        "description": "Description of the current task",
                        "maxLength": config.max_task_length,
                    }
                },
                "required": ["task"],
            }),
        },
        ToolDefinition {
            name: TOOL_FIND,
            description: "Find the scratchpad location in the workspace".to_string(),
            input_schema: empty_schema(),
        },
        ToolDefinition {
            name: TOOL_ADD_TO_REVIEW_LATER,
            description: "Queue a note under To Review Later.".to_string(),
            input_schema: note_schema("Item to review later", config),
        },
        ToolDefinition {
            name: TOOL_MARK_COMPLETED,
            description: "Record a completed item under today's Completed Today entry.".to_string(),
            input_schema: note_schema("Completed item", config),
        },
        ToolDefinition {
            name: TOOL_ARCHIVE_ITEM,
            description: "Move an item to Archived / Dismissed.".to_string(),
            input_schema: note_schema("Item to archive", config),
        },
    ]
}

fn empty_schema() -> Value {
    json!({"type": "object", "properties": {}, "required": []})
}

fn note_property(description: &str, config: &ScratchpadConfig) -> Value {
    json!({
        "type": "string",
        "description": description,
        "maxLength": config.max_note_length,
    })
}

fn note_schema(description: &str, config: &ScratchpadConfig) -> Value {
    json!({
        "type": "object",
        "properties": {"note": note_property(description, config)},
        "required": ["note"],
    })
}

/// Renders a gateway response as caller text.
pub fn render_text(response: &ToolResponse) -> String {
    let Some(output) = response.output.as_ref().filter(|_| response.ok) else {
        return format!("❌ Error: {}", response.message);
    };

    match output {
        ToolOutput::Document { content } => content.clone(),
        ToolOutput::Created(created) => {
            format!("✅ Scratchpad created at: {}", created.location)
        }
        ToolOutput::Located(found) if found.exists => {
            format!("📍 Scratchpad found at: {}", found.location)
        }
        ToolOutput::Located(_) => {
            "❌ No scratchpad found. Use scratchpad_create to create one.".to_string()
        }
        ToolOutput::Logged(receipt) => format!(
            "✅ Logged to scratchpad at {}\n\n**Type:** {} {} | **Priority:** {}\n**Note:** {}",
            receipt.time,
            receipt.kind.emoji(),
            receipt.kind.label(),
            receipt.priority.label(),
            receipt.note
        ),
        ToolOutput::FocusUpdated(receipt) => format!(
            "✅ Current focus updated at {}\n\n**Task:** {}",
            receipt.time, receipt.task
        ),
        ToolOutput::Queued(receipt) => {
            format!("✅ Added to review later\n\n- [ ] {}", receipt.note)
        }
        ToolOutput::Completed(receipt) => format!(
            "✅ Marked completed at {}\n\n**Note:** {}",
            receipt.stamp, receipt.note
        ),
        ToolOutput::Archived(receipt) => format!(
            "✅ Archived on {}\n\n**Note:** {}",
            receipt.stamp, receipt.note
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::tool_definitions;
    use scratchpad_core::config::ScratchpadConfig;
    use scratchpad_core::supported_tools;

    #[test]
    fn catalog_matches_gateway_routes() {
        let definitions = tool_definitions(&ScratchpadConfig::default());
        let names: Vec<&str> = definitions.iter().map(|def| def.name).collect();
        assert_eq!(names, supported_tools());
    }

    #[test]
    fn note_schemas_carry_configured_limit() {
        let config = ScratchpadConfig {
            max_note_length: 42,
            ..ScratchpadConfig::default()
        };
        let definitions = tool_definitions(&config);
        let log = definitions
            .iter()
            .find(|def| def.name == "scratchpad_log_interruption")
            .expect("log tool");
        assert_eq!(log.input_schema["properties"]["note"]["maxLength"], 42);
        assert_eq!(log.input_schema["required"][0], "note");
        assert_eq!(log.input_schema["properties"]["type"]["enum"][1], "bug");
    }
}
