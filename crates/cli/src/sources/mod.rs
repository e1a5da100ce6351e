//! Change sources
//!
//! A change source turns a trigger into the flat, de-duplicated list of
//! changed files the classifier consumes. Fetching is a single best-effort
//! attempt: any failure aborts the run.

mod file;
mod git;
mod github;

pub use file::FileSource;
pub use git::GitSource;
pub use github::GitHubSource;

use crate::context::Trigger;
use crate::error::CliResult;
use svcdiff_classifier::ChangeSet;

pub trait ChangeSource {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Fetch every file changed by `trigger`
    fn fetch(&self, trigger: &Trigger) -> CliResult<ChangeSet>;
}
