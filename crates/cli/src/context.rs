//! Invocation context
//!
//! Describes what triggered the run (a push or a pull request) and which
//! repository it belongs to. The context is built from explicit values so
//! tests never need to touch the process environment; `main` feeds it from
//! `GITHUB_EVENT_NAME`, `GITHUB_EVENT_PATH` and `GITHUB_REPOSITORY`.

use crate::error::{CliError, CliResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Repository coordinates on the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse an `owner/name` slug
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, name) = slug.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// What the run was triggered by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Push {
        /// Ids of the distinct commits in the push, oldest first
        commit_ids: Vec<String>,
        before: Option<String>,
        after: Option<String>,
    },
    PullRequest {
        number: u64,
        base_sha: Option<String>,
        head_sha: Option<String>,
    },
}

impl Trigger {
    /// Commit ids recorded in the changes artifact
    pub fn commit_ids(&self) -> Vec<String> {
        match self {
            Self::Push { commit_ids, .. } => commit_ids.clone(),
            Self::PullRequest { head_sha, .. } => head_sha.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    pub event_name: String,
    pub event: Value,
    /// `owner/name` slug used when the payload has no repository object
    pub repository: Option<String>,
}

impl ActionContext {
    pub fn new(event_name: impl Into<String>, event: Value) -> Self {
        Self {
            event_name: event_name.into(),
            event,
            repository: None,
        }
    }

    /// Load the context, reading the event payload from `event_path` if given
    pub fn load(
        event_name: Option<&str>,
        event_path: Option<&Path>,
        repository: Option<&str>,
    ) -> CliResult<Self> {
        let event = match event_path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    CliError::Configuration(format!(
                        "Failed to read event payload {}: {e}",
                        path.display()
                    ))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    CliError::Configuration(format!(
                        "Failed to parse event payload {}: {e}",
                        path.display()
                    ))
                })?
            }
            None => Value::Null,
        };

        let mut context = Self::new(event_name.unwrap_or_default(), event);
        context.repository = repository.map(str::to_string);
        Ok(context)
    }

    /// Determine the trigger, failing for anything but pushes and pull requests
    pub fn trigger(&self) -> CliResult<Trigger> {
        match self.event_name.as_str() {
            "push" => Ok(self.push_trigger()),
            "pull_request" | "pull_request_target" => self.pull_request_trigger(),
            "" => Err(CliError::UnsupportedTrigger(
                "no event name provided (expected push or pull_request)".to_string(),
            )),
            other => Err(CliError::UnsupportedTrigger(format!(
                "event '{other}' is neither a push nor a pull request"
            ))),
        }
    }

    fn push_trigger(&self) -> Trigger {
        let commit_ids = self
            .event
            .get("commits")
            .and_then(Value::as_array)
            .map(|commits| {
                commits
                    .iter()
                    .filter(|commit| {
                        commit
                            .get("distinct")
                            .and_then(Value::as_bool)
                            .unwrap_or(true)
                    })
                    .filter_map(|commit| commit.get("id").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Trigger::Push {
            commit_ids,
            before: string_at(&self.event, &["before"]),
            after: string_at(&self.event, &["after"]),
        }
    }

    fn pull_request_trigger(&self) -> CliResult<Trigger> {
        let number = self
            .event
            .pointer("/pull_request/number")
            .or_else(|| self.event.get("number"))
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                CliError::Configuration(
                    "pull request event payload has no pull request number".to_string(),
                )
            })?;

        Ok(Trigger::PullRequest {
            number,
            base_sha: string_at(&self.event, &["pull_request", "base", "sha"]),
            head_sha: string_at(&self.event, &["pull_request", "head", "sha"]),
        })
    }

    /// Repository the event belongs to
    pub fn repo(&self) -> CliResult<RepoRef> {
        let owner = string_at(&self.event, &["repository", "owner", "login"])
            .or_else(|| string_at(&self.event, &["repository", "owner", "name"]));
        let name = string_at(&self.event, &["repository", "name"]);

        if let (Some(owner), Some(name)) = (owner, name) {
            return Ok(RepoRef { owner, name });
        }

        self.repository
            .as_deref()
            .and_then(RepoRef::parse)
            .ok_or_else(|| {
                CliError::Configuration(
                    "repository not found in event payload or GITHUB_REPOSITORY".to_string(),
                )
            })
    }
}

fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
