//! Change classifier
//!
//! Maps a flat list of changed files onto service directories and derives
//! an added/modified/removed status for every service that was touched:
//!
//! 1. Services whose marker file was deleted are no longer on disk, so their
//!    directories are recovered from the change list and inserted into the
//!    working set.
//! 2. Every changed file is attributed to the innermost service directory
//!    that contains it. Files outside all services are dropped.
//! 3. If a service's marker file is among its changed files, the marker's
//!    status becomes the service status. Otherwise the service is modified.
//! 4. Services are grouped into buckets in the order they were first seen.

#[cfg(test)]
mod tests;

use crate::marker::Marker;
use crate::model::{ChangedFile, FileStatus, ServiceStatus};
use crate::resolver::{normalize_dir, ServiceDirectories};
use crate::result::Classification;
use indexmap::IndexMap;

/// Classifies change sets against a fixed marker filename
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    marker: Marker,
}

impl Classifier {
    pub fn new(marker: Marker) -> Self {
        Self { marker }
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Classify `changes` against the resolved service directories.
    ///
    /// Paths are normalized like service directories before any step runs.
    /// Renamed files and unknown non-marker files are ignored; a marker file
    /// with an unknown status still decides its service (as modified). The
    /// input directory set is left untouched; recovered directories live in
    /// a working copy.
    pub fn classify(&self, dirs: &ServiceDirectories, changes: &[ChangedFile]) -> Classification {
        let evidence: Vec<ChangedFile> = changes
            .iter()
            .map(|file| ChangedFile::new(normalize_dir(&file.path), file.status))
            .filter(|file| self.counts(file))
            .collect();

        let working = self.recover_removed(dirs, &evidence);

        let mut by_service: IndexMap<&str, Vec<&ChangedFile>> = IndexMap::new();
        for file in &evidence {
            if let Some(dir) = working.find_owner(&file.path) {
                by_service.entry(dir).or_default().push(file);
            }
        }

        let mut result = Classification::default();
        for (dir, files) in by_service {
            let status = files
                .iter()
                .find(|file| self.marker.matches(&file.path))
                .map(|marker_file| ServiceStatus::from_marker(marker_file.status))
                .unwrap_or(ServiceStatus::Modified);
            result.record(
                dir.to_string(),
                status,
                files.into_iter().cloned().collect(),
            );
        }
        result
    }

    fn counts(&self, file: &ChangedFile) -> bool {
        file.status.is_evidence()
            || (file.status == FileStatus::Unknown && self.marker.matches(&file.path))
    }

    /// Working set extended with the directories of deleted marker files
    fn recover_removed(
        &self,
        dirs: &ServiceDirectories,
        evidence: &[ChangedFile],
    ) -> ServiceDirectories {
        let mut working = dirs.clone();
        for file in evidence {
            if file.status != FileStatus::Removed {
                continue;
            }
            if let Some(dir) = self.marker.service_dir_of(&file.path) {
                working.insert(dir);
            }
        }
        working
    }
}

/// Classify with a one-off classifier
pub fn classify(
    marker: &Marker,
    dirs: &ServiceDirectories,
    changes: &[ChangedFile],
) -> Classification {
    Classifier::new(marker.clone()).classify(dirs, changes)
}
