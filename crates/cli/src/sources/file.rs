//! Changed files read from a JSON document

use super::ChangeSource;
use crate::context::Trigger;
use crate::error::{CliError, CliResult};
use std::fs;
use std::path::PathBuf;
use svcdiff_classifier::{ChangeSet, ChangedFile};

/// Reads a JSON array of `{ "path": ..., "status": ... }` objects
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the file without a trigger, for offline classification
    pub fn read(&self) -> CliResult<ChangeSet> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            CliError::UpstreamFetch(format!(
                "Failed to read changes file {}: {e}",
                self.path.display()
            ))
        })?;
        let files: Vec<ChangedFile> = serde_json::from_str(&content).map_err(|e| {
            CliError::UpstreamFetch(format!(
                "Failed to parse changes file {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(files.into_iter().collect())
    }
}

impl ChangeSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn fetch(&self, _trigger: &Trigger) -> CliResult<ChangeSet> {
        self.read()
    }
}
