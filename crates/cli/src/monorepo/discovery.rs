//! Service directory discovery
//!
//! Walks the search root for marker files and turns each match into a
//! workspace-relative service directory.

use crate::error::{CliError, CliResult};
use std::path::{Component, Path};
use svcdiff_classifier::{Marker, ServiceDirectories};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Find every directory under `workspace_root/search_root` that contains the marker
///
/// Returned directories are relative to `workspace_root`, use `/` as the
/// separator and come back longest-first without duplicates.
pub fn discover_service_dirs(
    workspace_root: &Path,
    search_root: &str,
    marker: &Marker,
    ignore_dirs: &[String],
) -> CliResult<ServiceDirectories> {
    let root = if search_root.is_empty() || search_root == "." {
        workspace_root.to_path_buf()
    } else {
        workspace_root.join(search_root)
    };

    if !root.is_dir() {
        return Err(CliError::Discovery(format!(
            "Search root not found: {}",
            root.display()
        )));
    }

    let mut found = Vec::new();
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry, ignore_dirs));

    for entry in walker {
        let entry = entry.map_err(|e| CliError::Discovery(format!("Failed to walk directory: {e}")))?;
        if !entry.file_type().is_file() || entry.file_name().to_str() != Some(marker.as_str()) {
            continue;
        }

        let Some(parent) = entry.path().parent() else {
            continue;
        };
        match relative_dir(parent, workspace_root) {
            Some(dir) if !dir.is_empty() => {
                debug!(service = %dir, "found service marker");
                found.push(dir);
            }
            _ => debug!(path = %entry.path().display(), "skipping marker at workspace root"),
        }
    }

    Ok(ServiceDirectories::new(found))
}

fn is_ignored(entry: &DirEntry, ignore_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| ignore_dirs.iter().any(|ignored| ignored == name))
}

/// `dir` relative to `root`, joined with `/`
fn relative_dir(dir: &Path, root: &Path) -> Option<String> {
    let relative = dir.strip_prefix(root).ok()?;
    let segments: Option<Vec<&str>> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_str()),
            _ => None,
        })
        .collect();
    segments.map(|segments| segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package main\n").unwrap();
    }

    fn ignore_defaults() -> Vec<String> {
        vec![".git".to_string(), "node_modules".to_string()]
    }

    #[test]
    fn test_discover_nested_services_longest_first() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "services/location/main.go");
        touch(root, "services/location/examples/web/main.go");
        touch(root, "services/events/main.go");
        touch(root, "services/events/handler.go");

        let dirs =
            discover_service_dirs(root, "services", &Marker::default(), &ignore_defaults()).unwrap();
        let dirs = dirs.into_vec();

        assert_eq!(dirs.len(), 3);
        assert_eq!(dirs[0], "services/location/examples/web");
        assert!(dirs.contains(&"services/location".to_string()));
        assert!(dirs.contains(&"services/events".to_string()));
    }

    #[test]
    fn test_discover_only_exact_marker_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "services/a/main.go");
        touch(root, "services/b/notmain.go");
        touch(root, "services/c/main.go.bak");

        let dirs =
            discover_service_dirs(root, "services", &Marker::default(), &ignore_defaults()).unwrap();

        assert_eq!(dirs.into_vec(), vec!["services/a".to_string()]);
    }

    #[test]
    fn test_discover_skips_ignored_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "services/a/main.go");
        touch(root, "services/a/node_modules/pkg/main.go");

        let dirs =
            discover_service_dirs(root, "services", &Marker::default(), &ignore_defaults()).unwrap();

        assert_eq!(dirs.into_vec(), vec!["services/a".to_string()]);
    }

    #[test]
    fn test_discover_from_workspace_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "main.go");
        touch(root, "cmd/api/main.go");
        touch(root, "services/events/main.go");

        let dirs = discover_service_dirs(root, ".", &Marker::default(), &[]).unwrap();
        let dirs = dirs.into_vec();

        // The root-level marker has no directory to report
        assert_eq!(dirs, vec!["services/events".to_string(), "cmd/api".to_string()]);
    }

    #[test]
    fn test_discover_custom_marker() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "apps/web/Dockerfile");
        touch(root, "apps/worker/main.go");

        let marker = Marker::new("Dockerfile").unwrap();
        let dirs = discover_service_dirs(root, "apps", &marker, &[]).unwrap();

        assert_eq!(dirs.into_vec(), vec!["apps/web".to_string()]);
    }

    #[test]
    fn test_discover_empty_search_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("services")).unwrap();

        let dirs =
            discover_service_dirs(temp_dir.path(), "services", &Marker::default(), &[]).unwrap();

        assert!(dirs.is_empty());
    }

    #[test]
    fn test_discover_missing_search_root() {
        let temp_dir = TempDir::new().unwrap();

        let result = discover_service_dirs(temp_dir.path(), "services", &Marker::default(), &[]);

        assert!(matches!(result, Err(CliError::Discovery(_))));
    }
}
