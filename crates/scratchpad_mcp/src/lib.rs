//! Line-delimited JSON-RPC tool transport for the scratchpad gateway.
//!
//! # See also
//! - `scratchpad_core::gateway` for tool routing and error classification.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
pub use tools::{render_text, tool_definitions, ToolDefinition};
