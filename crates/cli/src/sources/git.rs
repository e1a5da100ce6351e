//! Changed files computed from a local git checkout

use super::ChangeSource;
use crate::context::Trigger;
use crate::error::{CliError, CliResult};
use std::path::PathBuf;
use std::process::Command;
use svcdiff_classifier::{ChangeSet, ChangedFile, FileStatus};
use tracing::debug;

/// Runs `git` in a local repository
///
/// Pushes are diffed commit by commit, pull requests as `base...head`.
/// Rename detection stays on so renames are reported the same way the
/// hosting API reports them.
#[derive(Debug, Clone)]
pub struct GitSource {
    repo_dir: PathBuf,
}

impl GitSource {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn run(&self, args: &[&str]) -> CliResult<String> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| CliError::UpstreamFetch(format!("Failed to run git: {e}")))?;

        if !output.status.success() {
            return Err(CliError::UpstreamFetch(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn commit_changes(&self, sha: &str) -> CliResult<Vec<ChangedFile>> {
        let output = self.run(&[
            "diff-tree",
            "-r",
            "--root",
            "--no-commit-id",
            "--name-status",
            "-M",
            sha,
        ])?;
        Ok(parse_name_status(&output))
    }

    fn range_changes(&self, base: &str, head: &str) -> CliResult<Vec<ChangedFile>> {
        let range = format!("{base}...{head}");
        let output = self.run(&["diff", "--name-status", "-M", &range])?;
        Ok(parse_name_status(&output))
    }
}

impl ChangeSource for GitSource {
    fn name(&self) -> &'static str {
        "git"
    }

    fn fetch(&self, trigger: &Trigger) -> CliResult<ChangeSet> {
        let mut changes = ChangeSet::new();
        match trigger {
            Trigger::Push { commit_ids, .. } => {
                for sha in commit_ids {
                    changes.extend(self.commit_changes(sha)?);
                }
            }
            Trigger::PullRequest {
                base_sha, head_sha, ..
            } => {
                let (Some(base), Some(head)) = (base_sha, head_sha) else {
                    return Err(CliError::UpstreamFetch(
                        "pull request payload is missing base or head sha".to_string(),
                    ));
                };
                changes.extend(self.range_changes(base, head)?);
            }
        }
        Ok(changes)
    }
}

/// Parse `git diff --name-status` output
///
/// Renames (`R100\told\tnew`) are reported at their new path. Copies are
/// reported as unknown, matching how the hosting API's `copied` status is
/// treated.
pub fn parse_name_status(output: &str) -> Vec<ChangedFile> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let code = fields.next()?.trim();
            let path = fields.last()?;
            if path.is_empty() {
                return None;
            }
            let status = match code.chars().next()? {
                'A' => FileStatus::Added,
                'M' | 'T' => FileStatus::Modified,
                'D' => FileStatus::Removed,
                'R' => FileStatus::Renamed,
                _ => FileStatus::Unknown,
            };
            Some(ChangedFile::new(path, status))
        })
        .collect()
}
