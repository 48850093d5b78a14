//! Filename and workspace-relative path validation.

use crate::error::{ScratchpadError, ScratchpadResult};
use crate::security::sanitize::find_blocked_pattern;
use std::path::{Component, Path, PathBuf};

/// Allow-lists applied to every caller-selected location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPolicy {
    pub max_path_length: usize,
    pub allowed_directories: Vec<String>,
    /// Lowercase, dot-prefixed.
    pub allowed_extensions: Vec<String>,
}

impl PathPolicy {
    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }

    fn extension_error(&self) -> ScratchpadError {
        ScratchpadError::InvalidPath(format!(
            "File extension must be one of: {}",
            self.allowed_extensions.join(", ")
        ))
    }
}

/// Validates a bare file name (no directory part).
///
/// # Errors
/// - `InvalidPath` when empty, too long, denylisted, containing a path
///   separator, or lacking an allowed extension.
pub fn validate_filename(name: &str, policy: &PathPolicy) -> ScratchpadResult<()> {
    if name.trim().is_empty() {
        return Err(ScratchpadError::InvalidPath(
            "Filename must not be empty".to_string(),
        ));
    }
    if name.chars().count() > policy.max_path_length {
        return Err(ScratchpadError::InvalidPath(format!(
            "Filename exceeds maximum length of {}",
            policy.max_path_length
        )));
    }
    if find_blocked_pattern(name).is_some() {
        return Err(ScratchpadError::InvalidPath(
            "Filename contains blocked pattern".to_string(),
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(ScratchpadError::InvalidPath(
            "Filename must not contain path separators".to_string(),
        ));
    }
    if !policy.has_allowed_extension(Path::new(name)) {
        return Err(policy.extension_error());
    }
    Ok(())
}

/// Resolves `path` against the canonical `workspace` and checks it stays
/// inside an allowed top-level directory with an allowed extension.
///
/// The target itself need not exist. Its nearest existing ancestor is
/// canonicalized and must also resolve inside the workspace.
pub fn validate_path(path: &str, workspace: &Path, policy: &PathPolicy) -> ScratchpadResult<PathBuf> {
    if path.chars().count() > policy.max_path_length {
        return Err(ScratchpadError::InvalidPath(format!(
            "Path exceeds maximum length of {}",
            policy.max_path_length
        )));
    }
    if find_blocked_pattern(path).is_some() {
        return Err(ScratchpadError::InvalidPath(
            "Path contains blocked pattern".to_string(),
        ));
    }

    let mut relative = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(outside_workspace());
            }
        }
    }

    let full_path = workspace.join(&relative);
    if !full_path.starts_with(workspace) {
        return Err(outside_workspace());
    }
    if !policy.has_allowed_extension(&full_path) {
        return Err(policy.extension_error());
    }

    let mut parts = relative.components();
    let top_dir = parts.next().and_then(|part| part.as_os_str().to_str());
    let has_file_below = parts.next().is_some();
    match top_dir {
        Some(dir) if has_file_below && policy.allowed_directories.iter().any(|d| d == dir) => {}
        _ => {
            return Err(ScratchpadError::InvalidPath(format!(
                "Scratchpad must be in allowed directory: {}",
                policy.allowed_directories.join(", ")
            )));
        }
    }

    if let Some(existing) = nearest_existing_ancestor(&full_path) {
        let resolved = existing.canonicalize()?;
        if !resolved.starts_with(workspace) {
            return Err(outside_workspace());
        }
    }

    Ok(full_path)
}

fn nearest_existing_ancestor(path: &Path) -> Option<&Path> {
    path.ancestors().find(|ancestor| ancestor.exists())
}

fn outside_workspace() -> ScratchpadError {
    ScratchpadError::InvalidPath("Path must be within workspace".to_string())
}
