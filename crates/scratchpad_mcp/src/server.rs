//! Stdio tool server.
//!
//! # Responsibility
//! - Read one JSON-RPC message per line and answer on the writer.
//! - Translate `tools/call` into `Gateway::handle`.
//!
//! # Invariants
//! - Only protocol messages are written to the writer; diagnostics go to `log`.
//! - Notifications never produce output.
//! - Tool failures are successful RPC results with `isError: true`.

use crate::protocol::{
    Request, RequestId, Response, RpcError, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tools::{render_text, tool_definitions, ToolDefinition};
use log::{debug, info, warn};
use scratchpad_core::{Clock, DocumentStore, Gateway, ScratchpadConfig};
use serde_json::{json, Map, Value};
use std::io::{self, BufRead, Write};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "scratchpad";

/// Stdio front end over one gateway.
pub struct McpServer<'a, S: DocumentStore, C: Clock> {
    gateway: &'a Gateway<S, C>,
    tools: Vec<ToolDefinition>,
}

impl<'a, S: DocumentStore, C: Clock> McpServer<'a, S, C> {
    pub fn new(gateway: &'a Gateway<S, C>, config: &ScratchpadConfig) -> Self {
        Self {
            gateway,
            tools: tool_definitions(config),
        }
    }

    /// Serves requests until `reader` reaches end of input.
    ///
    /// # Errors
    /// - I/O failures on `reader` or `writer`.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> io::Result<()> {
        info!("event=server_start module=mcp status=ok protocol={PROTOCOL_VERSION}");
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line) {
                let encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
                writer.write_all(encoded.as_bytes())?;
                writer.write_all(b"\n")?;
                writer.flush()?;
            }
        }
        info!("event=server_stop module=mcp status=ok reason=eof");
        Ok(())
    }

    /// Handles one raw message; `None` means nothing is sent back.
    pub fn handle_line(&self, line: &str) -> Option<Response> {
        let value = match serde_json::from_str::<Value>(line) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=rpc_parse module=mcp status=error detail={err}");
                return Some(Response::error(
                    RequestId::Null,
                    RpcError::with_reason(PARSE_ERROR, "Parse error", err.to_string()),
                ));
            }
        };

        let request = match serde_json::from_value::<Request>(value) {
            Ok(request) => request,
            Err(err) => {
                return Some(Response::error(
                    RequestId::Null,
                    RpcError::with_reason(INVALID_REQUEST, "Invalid Request", err.to_string()),
                ));
            }
        };
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(Response::error(
                request.id.unwrap_or(RequestId::Null),
                RpcError::new(INVALID_REQUEST, "Invalid Request"),
            ));
        }

        let Some(id) = request.id.clone() else {
            debug!(
                "event=rpc_notification module=mcp status=ok method={}",
                request.method
            );
            return None;
        };
        Some(self.dispatch(id, request))
    }

    fn dispatch(&self, id: RequestId, request: Request) -> Response {
        match request.method.as_str() {
            "initialize" => Response::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {"tools": {}},
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": scratchpad_core::core_version(),
                    },
                }),
            ),
            "ping" => Response::success(id, json!({})),
            "tools/list" => Response::success(id, json!({ "tools": self.tools })),
            "tools/call" => self.call_tool(id, request.params),
            other => {
                debug!("event=rpc_dispatch module=mcp status=error method={other}");
                Response::error(id, RpcError::new(METHOD_NOT_FOUND, "Method not found"))
            }
        }
    }

    fn call_tool(&self, id: RequestId, params: Option<Value>) -> Response {
        let Some(Value::Object(mut params)) = params else {
            return invalid_params(id, "tools/call requires an object of params");
        };
        let name = match params.remove("name") {
            Some(Value::String(name)) => name,
            _ => return invalid_params(id, "tools/call requires a string `name`"),
        };
        let arguments = match params.remove("arguments") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(Value::Object(arguments)) => Value::Object(arguments),
            Some(_) => return invalid_params(id, "`arguments` must be an object"),
        };

        let outcome = self.gateway.handle(&name, &arguments);
        Response::success(
            id,
            json!({
                "content": [{"type": "text", "text": render_text(&outcome)}],
                "isError": !outcome.ok,
            }),
        )
    }
}

fn invalid_params(id: RequestId, reason: &str) -> Response {
    Response::error(
        id,
        RpcError::with_reason(INVALID_PARAMS, "Invalid params", reason),
    )
}
