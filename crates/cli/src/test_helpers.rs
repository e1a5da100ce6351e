//! Shared helpers for unit tests in the CLI crate
//!
//! Integration tests have their own helpers in `tests/integration_test_helpers.rs`.

use std::fs;
use std::path::{Path, PathBuf};

/// Switches the working directory for the lifetime of the guard
///
/// Workspace detection reads the process working directory, so tests using
/// this guard must also be `#[serial]`.
pub struct DirGuard {
    original_dir: PathBuf,
}

impl DirGuard {
    /// Create `path` if needed and make it the working directory
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(Self { original_dir })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}
