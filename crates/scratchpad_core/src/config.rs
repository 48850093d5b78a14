//! Runtime configuration for limits and storage layout.
//!
//! # Responsibility
//! - Hold every tunable limit of the security gate in one value.
//! - Enumerate the storage roots and extensions callers may select from.
//!
//! # Invariants
//! - Defaults reproduce the stock limits (60 req/60 s, 500/200 chars, 1 MiB).
//! - `validate()` must pass before a config reaches the gateway.

use crate::error::{ScratchpadError, ScratchpadResult};
use crate::security::path::{validate_filename, PathPolicy};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MAX_REQUESTS: usize = 60;
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 60;
pub const DEFAULT_MAX_NOTE_LENGTH: usize = 500;
pub const DEFAULT_MAX_TASK_LENGTH: usize = 200;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
pub const DEFAULT_MAX_PATH_LENGTH: usize = 256;
pub const DEFAULT_DOCUMENT_NAME: &str = "scratchpad.md";
pub const DEFAULT_LOCATION: &str = ".idea/scratchpad.md";

const DEFAULT_ALLOWED_DIRECTORIES: &[&str] = &[
    ".idea",
    ".vscode",
    ".dart_tool",
    ".cache",
    "docs",
    ".scratchpad",
];
const DEFAULT_SEARCH_DIRECTORIES: &[&str] =
    &[".idea", ".vscode", ".dart_tool", ".cache", ".scratchpad"];
const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[".md", ".txt", ".markdown"];

/// Limits and layout for one scratchpad gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScratchpadConfig {
    /// Admissions allowed per rate window.
    pub max_requests: usize,
    /// Rate window length in seconds.
    pub rate_window_secs: u64,
    pub max_note_length: usize,
    pub max_task_length: usize,
    /// Byte limit applied to every read and write.
    pub max_file_size: u64,
    pub max_path_length: usize,
    /// File name probed inside each search directory.
    pub document_name: String,
    /// Workspace-relative target used when `create` gets no location.
    pub default_location: String,
    /// First path components a document may live under.
    pub allowed_directories: Vec<String>,
    /// Directories probed, in order, by discovery.
    pub search_directories: Vec<String>,
    /// Lowercase extensions including the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for ScratchpadConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            rate_window_secs: DEFAULT_RATE_WINDOW_SECS,
            max_note_length: DEFAULT_MAX_NOTE_LENGTH,
            max_task_length: DEFAULT_MAX_TASK_LENGTH,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            default_location: DEFAULT_LOCATION.to_string(),
            allowed_directories: to_owned_list(DEFAULT_ALLOWED_DIRECTORIES),
            search_directories: to_owned_list(DEFAULT_SEARCH_DIRECTORIES),
            allowed_extensions: to_owned_list(DEFAULT_ALLOWED_EXTENSIONS),
        }
    }
}

impl ScratchpadConfig {
    /// Parses a JSON config document; absent fields keep their defaults.
    pub fn from_json_str(raw: &str) -> ScratchpadResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ScratchpadError::InvalidInput(format!("invalid config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> ScratchpadResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks internal consistency of limits and layout.
    ///
    /// # Errors
    /// - `InvalidInput` when a limit is zero.
    /// - `InvalidPath` when the document name or a search directory falls
    ///   outside the allowed layout.
    pub fn validate(&self) -> ScratchpadResult<()> {
        if self.max_requests == 0 || self.rate_window_secs == 0 {
            return Err(ScratchpadError::InvalidInput(
                "rate limit must allow at least one request per window".to_string(),
            ));
        }
        if self.max_note_length == 0 || self.max_task_length == 0 || self.max_file_size == 0 {
            return Err(ScratchpadError::InvalidInput(
                "content limits must be positive".to_string(),
            ));
        }

        let policy = self.path_policy();
        validate_filename(&self.document_name, &policy)?;
        for dir in &self.search_directories {
            if !self.allowed_directories.contains(dir) {
                return Err(ScratchpadError::InvalidPath(format!(
                    "search directory `{dir}` is not an allowed directory"
                )));
            }
        }
        Ok(())
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window_secs)
    }

    /// Path validation policy derived from this config.
    pub fn path_policy(&self) -> PathPolicy {
        PathPolicy {
            max_path_length: self.max_path_length,
            allowed_directories: self.allowed_directories.clone(),
            allowed_extensions: self
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        }
    }

    /// Workspace-relative discovery candidates, in probe order.
    pub fn search_paths(&self) -> Vec<String> {
        self.search_directories
            .iter()
            .map(|dir| format!("{dir}/{}", self.document_name))
            .collect()
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
