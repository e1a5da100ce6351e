//! Data model shared by the resolver and the classifier

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a single changed file, as reported by a source-control diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    #[default]
    Unknown,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a file with this status counts towards a service status.
    ///
    /// Renamed and unknown files never do, except that the classifier still
    /// reads an unknown-status marker file as a modification.
    pub fn is_evidence(&self) -> bool {
        matches!(self, Self::Added | Self::Modified | Self::Removed)
    }
}

impl FromStr for FileStatus {
    type Err = std::convert::Infallible;

    /// Hosting APIs report more statuses than we model (`copied`, `changed`,
    /// `unchanged`); all of them collapse to `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "removed" | "deleted" => Self::Removed,
            "renamed" => Self::Renamed,
            _ => Self::Unknown,
        })
    }
}

impl From<String> for FileStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A changed file path plus its status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Repository-relative path using `/` separators (e.g. `services/events/main.go`)
    #[serde(alias = "filename")]
    pub path: String,
    #[serde(default)]
    pub status: FileStatus,
}

impl ChangedFile {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// Derived status of a service directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Added,
    Modified,
    Removed,
}

impl ServiceStatus {
    /// All buckets in output order
    pub const ALL: [ServiceStatus; 3] = [Self::Added, Self::Modified, Self::Removed];

    /// Map the status of a service's marker file onto the service itself.
    ///
    /// Creation of the marker means the service was added, deletion means it
    /// was removed, anything else means it was modified.
    pub fn from_marker(status: FileStatus) -> Self {
        match status {
            FileStatus::Added => Self::Added,
            FileStatus::Removed => Self::Removed,
            _ => Self::Modified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, de-duplicated list of changed files
///
/// Change sources that fan out over several commits merge their diffs
/// through this type. Exact `(path, status)` repeats are dropped and the
/// first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    files: Vec<ChangedFile>,
    seen: HashSet<(String, FileStatus)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, returning `false` when it was already present
    pub fn push(&mut self, file: ChangedFile) -> bool {
        if !self.seen.insert((file.path.clone(), file.status)) {
            return false;
        }
        self.files.push(file);
        true
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[ChangedFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<ChangedFile> {
        self.files
    }
}

impl Extend<ChangedFile> for ChangeSet {
    fn extend<T: IntoIterator<Item = ChangedFile>>(&mut self, iter: T) {
        for file in iter {
            self.push(file);
        }
    }
}

impl FromIterator<ChangedFile> for ChangeSet {
    fn from_iter<T: IntoIterator<Item = ChangedFile>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
