//! Changed files fetched from the GitHub REST API

use super::ChangeSource;
use crate::context::{RepoRef, Trigger};
use crate::error::{CliError, CliResult};
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use svcdiff_classifier::{ChangeSet, ChangedFile};
use tracing::{debug, warn};

/// Files per page for pull request listings (the API maximum)
const PAGE_SIZE: usize = 100;

/// The pull request files endpoint stops at 3000 files
const MAX_PAGES: usize = 30;

const USER_AGENT: &str = concat!("svcdiff/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    files: Vec<ChangedFile>,
}

/// GitHub REST client scoped to one repository
pub struct GitHubSource {
    client: reqwest::Client,
    api_url: String,
    token: String,
    repo: RepoRef,
}

impl GitHubSource {
    /// Create a source; an empty token is rejected before any request is made
    pub fn new(api_url: &str, token: &str, repo: RepoRef) -> CliResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CliError::Configuration("Missing token".to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CliError::UpstreamFetch(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            repo,
        })
    }

    fn commit_url(&self, sha: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_url, self.repo.owner, self.repo.name, sha
        )
    }

    fn pull_files_url(&self, number: u64, page: usize) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/files?per_page={}&page={}",
            self.api_url, self.repo.owner, self.repo.name, number, PAGE_SIZE, page
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> CliResult<T> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| CliError::UpstreamFetch(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CliError::UpstreamFetch(format!(
                "GitHub API returned {status} for {url}: {}",
                body.trim()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CliError::UpstreamFetch(format!("Invalid response from {url}: {e}")))
    }

    async fn commit_files(&self, sha: &str) -> CliResult<Vec<ChangedFile>> {
        let commit: CommitResponse = self.get_json(&self.commit_url(sha)).await?;
        Ok(commit.files)
    }

    async fn pull_request_files(&self, number: u64) -> CliResult<Vec<ChangedFile>> {
        let mut files = Vec::new();
        for page in 1..=MAX_PAGES {
            let batch: Vec<ChangedFile> = self.get_json(&self.pull_files_url(number, page)).await?;
            let last_page = batch.len() < PAGE_SIZE;
            files.extend(batch);
            if last_page {
                return Ok(files);
            }
        }
        warn!(
            number,
            "pull request file listing truncated at {} files",
            MAX_PAGES * PAGE_SIZE
        );
        Ok(files)
    }

    async fn fetch_async(&self, trigger: &Trigger) -> CliResult<ChangeSet> {
        let mut changes = ChangeSet::new();
        match trigger {
            Trigger::Push { commit_ids, .. } => {
                // Commits are fetched concurrently; results come back in commit order
                let per_commit =
                    try_join_all(commit_ids.iter().map(|sha| self.commit_files(sha))).await?;
                for files in per_commit {
                    changes.extend(files);
                }
            }
            Trigger::PullRequest { number, .. } => {
                changes.extend(self.pull_request_files(*number).await?);
            }
        }
        Ok(changes)
    }
}

impl ChangeSource for GitHubSource {
    fn name(&self) -> &'static str {
        "github"
    }

    fn fetch(&self, trigger: &Trigger) -> CliResult<ChangeSet> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::UpstreamFetch(format!("Failed to start async runtime: {e}")))?;
        runtime.block_on(self.fetch_async(trigger))
    }
}
