//! Service marker filename

use crate::error::ClassifierError;
use std::fmt;

/// Marker used when none is configured
pub const DEFAULT_MARKER: &str = "main.go";

/// The filename whose presence in a directory makes that directory a service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker(String);

impl Marker {
    /// Create a marker, rejecting names that cannot be a single path segment
    pub fn new(name: impl Into<String>) -> Result<Self, ClassifierError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ClassifierError::InvalidMarker(
                "marker filename must not be empty".to_string(),
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ClassifierError::InvalidMarker(format!(
                "'{name}' contains a path separator"
            )));
        }
        if name == "." || name == ".." {
            return Err(ClassifierError::InvalidMarker(format!(
                "'{name}' is not a filename"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the last segment of `path` is exactly the marker filename
    pub fn matches(&self, path: &str) -> bool {
        file_name(path) == self.0
    }

    /// Service directory implied by a marker file path.
    ///
    /// Returns `None` when `path` is not a marker file or the marker sits at
    /// the repository root.
    pub fn service_dir_of<'a>(&self, path: &'a str) -> Option<&'a str> {
        if !self.matches(path) {
            return None;
        }
        let trimmed = path.trim_end_matches('/');
        let (dir, _) = trimmed.rsplit_once('/')?;
        let dir = dir.strip_prefix("./").unwrap_or(dir);
        if dir.is_empty() || dir == "." {
            None
        } else {
            Some(dir)
        }
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self(DEFAULT_MARKER.to_string())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_rejects_invalid_names() {
        assert!(Marker::new("").is_err());
        assert!(Marker::new("cmd/main.go").is_err());
        assert!(Marker::new("cmd\\main.go").is_err());
        assert!(Marker::new("..").is_err());
        assert!(Marker::new("Dockerfile").is_ok());
    }

    #[test]
    fn test_marker_matches_whole_segment_only() {
        let marker = Marker::default();
        assert!(marker.matches("services/events/main.go"));
        assert!(marker.matches("main.go"));
        assert!(!marker.matches("services/events/notmain.go"));
        assert!(!marker.matches("services/main.go.orig"));
    }

    #[test]
    fn test_service_dir_of() {
        let marker = Marker::default();
        assert_eq!(
            marker.service_dir_of("services/platform-test/main.go"),
            Some("services/platform-test")
        );
        assert_eq!(marker.service_dir_of("./svc/main.go"), Some("svc"));
        assert_eq!(marker.service_dir_of("main.go"), None);
        assert_eq!(marker.service_dir_of("svc/helper.go"), None);
    }
}
