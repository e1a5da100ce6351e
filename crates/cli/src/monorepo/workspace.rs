//! Workspace root detection

use crate::error::{CliError, CliResult};
use crate::utils::config::CONFIG_FILE_NAME;
use std::path::{Path, PathBuf};

/// Check if a directory looks like the root of a repository workspace
pub fn is_workspace_root(path: &Path) -> bool {
    path.join(CONFIG_FILE_NAME).is_file() || path.join(".git").exists()
}

/// Detect workspace root by walking up directory tree
///
/// Looks for:
/// 1. `.svcdiff.yaml`
/// 2. `.git` (directory, or file for worktrees and submodules)
pub fn detect_workspace_root(start_path: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let current_dir = std::env::current_dir()
        .map_err(|e| CliError::Message(format!("Failed to get current directory: {e}")))?;

    let mut path = match start_path {
        Some(start) if start.is_absolute() => start.to_path_buf(),
        Some(start) => current_dir.join(start),
        None => current_dir,
    };

    loop {
        if is_workspace_root(&path) {
            return Ok(Some(path));
        }

        // Move up one directory
        match path.parent() {
            Some(parent) if parent != path => path = parent.to_path_buf(),
            _ => break,
        }
    }

    Ok(None)
}

/// Resolve the workspace root from an explicit flag, detection, or the current directory
pub fn resolve_workspace_root(workspace_root_flag: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(root) = workspace_root_flag {
        return Ok(root.to_path_buf());
    }
    if let Some(root) = detect_workspace_root(None)? {
        return Ok(root);
    }
    std::env::current_dir()
        .map_err(|e| CliError::Message(format!("Failed to get current directory: {e}")))
}
