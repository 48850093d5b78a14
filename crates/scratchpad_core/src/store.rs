//! Document persistence contract and filesystem implementation.
//!
//! # Responsibility
//! - Resolve where the scratchpad lives inside the workspace.
//! - Read and write the whole document as UTF-8 text.
//!
//! # Invariants
//! - Every location is validated against the workspace path policy.
//! - Reads and writes above `max_file_size` bytes are rejected, measured on
//!   encoded bytes rather than characters.
//! - `create` never overwrites an existing file.

use crate::config::ScratchpadConfig;
use crate::error::{ScratchpadError, ScratchpadResult};
use crate::security::path::{validate_path, PathPolicy};
use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Storage operations the mutation engine needs.
pub trait DocumentStore {
    /// Canonical workspace root.
    fn workspace(&self) -> &Path;
    /// Finds the document, if any exists.
    fn locate(&mut self) -> ScratchpadResult<Option<PathBuf>>;
    /// Returns whether a document can currently be located.
    fn exists(&mut self) -> bool {
        matches!(self.locate(), Ok(Some(_)))
    }
    /// Writes `template` to a new file at the workspace-relative `location`.
    fn create(&mut self, location: &str, template: &str) -> ScratchpadResult<PathBuf>;
    /// Reads the full document.
    fn read(&mut self) -> ScratchpadResult<String>;
    /// Replaces the full document.
    fn write(&mut self, content: &str) -> ScratchpadResult<()>;
}

/// Scratchpad stored as one file under an allow-listed workspace directory.
#[derive(Debug)]
pub struct FsDocumentStore {
    workspace: PathBuf,
    policy: PathPolicy,
    search_paths: Vec<String>,
    max_file_size: u64,
    resolved: Option<PathBuf>,
}

impl FsDocumentStore {
    /// Opens a store rooted at `workspace`.
    ///
    /// # Errors
    /// - `InvalidPath` when the workspace does not exist or is not a directory.
    pub fn open(workspace: &Path, config: &ScratchpadConfig) -> ScratchpadResult<Self> {
        let workspace = workspace.canonicalize().map_err(|_| {
            ScratchpadError::InvalidPath("Workspace path does not exist".to_string())
        })?;
        if !workspace.is_dir() {
            return Err(ScratchpadError::InvalidPath(
                "Workspace path is not a directory".to_string(),
            ));
        }

        Ok(Self {
            workspace,
            policy: config.path_policy(),
            search_paths: config.search_paths(),
            max_file_size: config.max_file_size,
            resolved: None,
        })
    }

    fn require_location(&mut self) -> ScratchpadResult<PathBuf> {
        self.locate()?.ok_or(ScratchpadError::NotFound)
    }

    fn check_size(&self, size: u64) -> ScratchpadResult<()> {
        if size > self.max_file_size {
            return Err(ScratchpadError::SizeExceeded {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn workspace(&self) -> &Path {
        &self.workspace
    }

    fn locate(&mut self) -> ScratchpadResult<Option<PathBuf>> {
        if let Some(path) = self.resolved.as_ref().filter(|path| path.exists()) {
            return Ok(Some(path.clone()));
        }
        self.resolved = None;

        for candidate in &self.search_paths {
            let Ok(full_path) = validate_path(candidate, &self.workspace, &self.policy) else {
                continue;
            };
            if full_path.is_file() {
                debug!(
                    "event=document_located module=store status=ok location={}",
                    candidate
                );
                self.resolved = Some(full_path.clone());
                return Ok(Some(full_path));
            }
        }
        Ok(None)
    }

    fn create(&mut self, location: &str, template: &str) -> ScratchpadResult<PathBuf> {
        let full_path = validate_path(location, &self.workspace, &self.policy)?;
        let display = relative_display(&self.workspace, &full_path);
        if full_path.exists() {
            return Err(ScratchpadError::AlreadyExists(display));
        }
        self.check_size(template.len() as u64)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .map_err(|err| match err.kind() {
                io::ErrorKind::AlreadyExists => ScratchpadError::AlreadyExists(display.clone()),
                _ => ScratchpadError::Io(err),
            })?;
        file.write_all(template.as_bytes())?;

        info!(
            "event=document_created module=store status=ok location={} bytes={}",
            display,
            template.len()
        );
        self.resolved = Some(full_path.clone());
        Ok(full_path)
    }

    fn read(&mut self) -> ScratchpadResult<String> {
        let path = self.require_location()?;
        let metadata = fs::metadata(&path).map_err(not_found_or_io)?;
        self.check_size(metadata.len())?;

        let bytes = fs::read(&path).map_err(not_found_or_io)?;
        self.check_size(bytes.len() as u64)?;
        String::from_utf8(bytes).map_err(|_| ScratchpadError::Encoding(path))
    }

    fn write(&mut self, content: &str) -> ScratchpadResult<()> {
        self.check_size(content.len() as u64)?;
        let path = self.require_location()?;
        fs::write(&path, content)?;
        debug!(
            "event=document_written module=store status=ok bytes={}",
            content.len()
        );
        Ok(())
    }
}

/// Renders `path` relative to the workspace for caller-facing output.
pub fn relative_display(workspace: &Path, path: &Path) -> String {
    path.strip_prefix(workspace)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn not_found_or_io(err: io::Error) -> ScratchpadError {
    match err.kind() {
        io::ErrorKind::NotFound => ScratchpadError::NotFound,
        _ => ScratchpadError::Io(err),
    }
}
