//! Stdio tool server entry point.
//!
//! # Responsibility
//! - Resolve workspace, config and logging settings from the environment.
//! - Build one gateway and serve JSON-RPC on stdin/stdout until EOF.
//!
//! # Invariants
//! - stdout carries protocol messages only; startup failures go to stderr.

use log::{error, info};
use scratchpad_core::{default_log_level, init_logging, Gateway, ScratchpadConfig};
use scratchpad_mcp::McpServer;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const ENV_WORKSPACE: &str = "WORKSPACE_PATH";
const ENV_CONFIG: &str = "SCRATCHPAD_CONFIG";
const ENV_LOG_LEVEL: &str = "SCRATCHPAD_LOG_LEVEL";
const ENV_LOG_DIR: &str = "SCRATCHPAD_LOG_DIR";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=server_exit module=cli status=error detail={message}");
            eprintln!("scratchpad-mcp: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let level = non_empty_env(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
    let log_dir = non_empty_env(ENV_LOG_DIR);
    init_logging(&level, log_dir.as_deref())?;

    let workspace = resolve_workspace()?;
    let config = load_config()?;
    let gateway = Gateway::open(&workspace, &config)
        .map_err(|err| format!("failed to open workspace `{}`: {err}", workspace.display()))?;
    info!(
        "event=server_ready module=cli status=ok version={}",
        scratchpad_core::core_version()
    );

    let server = McpServer::new(&gateway, &config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    server
        .serve(stdin.lock(), stdout.lock())
        .map_err(|err| format!("stdio transport failed: {err}"))
}

fn resolve_workspace() -> Result<PathBuf, String> {
    match non_empty_env(ENV_WORKSPACE) {
        Some(path) => Ok(PathBuf::from(path)),
        None => env::current_dir().map_err(|err| format!("cannot read current directory: {err}")),
    }
}

fn load_config() -> Result<ScratchpadConfig, String> {
    let Some(path) = non_empty_env(ENV_CONFIG) else {
        return Ok(ScratchpadConfig::default());
    };
    ScratchpadConfig::load(Path::new(&path))
        .map_err(|err| format!("failed to load config `{path}`: {err}"))
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
