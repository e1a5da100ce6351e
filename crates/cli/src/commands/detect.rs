//! Detect command implementation - the full workflow run
//!
//! Resolves the trigger, fetches the changed files, discovers the services on
//! disk, classifies them and publishes the result to stdout, the workflow
//! output file and the changes artifact.

use crate::context::{ActionContext, Trigger};
use crate::error::{CliError, CliResult};
use crate::monorepo::{discover_service_dirs, resolve_workspace_root};
use crate::output::{self, ChangesArtifact, OutputFormat};
use crate::sources::{ChangeSource, FileSource, GitHubSource, GitSource};
use crate::utils::config::{load_config, ConfigFile, Overrides, SourceKind};
use std::path::{Path, PathBuf};
use svcdiff_classifier::{Classifier, Marker, ServiceBuckets, ServiceStatus};
use tracing::{debug, info};

/// Default artifact filename, written to the home directory
pub const ARTIFACT_FILE_NAME: &str = "changes.json";

pub struct Options {
    /// Workspace root (auto-detected if not provided)
    pub workspace_root: Option<PathBuf>,
    pub overrides: Overrides,
    /// JSON file of changed files (implies the file source)
    pub changes_from: Option<PathBuf>,
    /// API token for the GitHub source
    pub token: Option<String>,
    pub event_name: Option<String>,
    pub event_path: Option<PathBuf>,
    /// `owner/name` fallback when the payload has no repository
    pub repository: Option<String>,
    /// Workflow output file (`GITHUB_OUTPUT`)
    pub github_output: Option<PathBuf>,
    /// Home directory for the default artifact location
    pub home: Option<PathBuf>,
    pub no_artifact: bool,
    pub format: OutputFormat,
}

/// Run detection and print the classified services
pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(buckets) => match output::render(&buckets, options.format) {
            Ok(rendered) => {
                println!("{rendered}");
                0
            }
            Err(e) => {
                eprintln!("✗ Failed to render result");
                eprintln!("  Error: {e}");
                e.exit_code()
            }
        },
        Err(e) => {
            eprintln!("✗ Service detection failed");
            eprintln!("  Error: {e}");
            e.exit_code()
        }
    }
}

fn run_inner(options: &Options) -> CliResult<ServiceBuckets> {
    let workspace_root = resolve_workspace_root(options.workspace_root.as_deref())?;
    let mut overrides = options.overrides.clone();
    if options.changes_from.is_some() {
        overrides.source = Some(SourceKind::File);
    }
    let config = load_config(&workspace_root)?.with_overrides(&overrides);
    let marker = Marker::new(config.marker.clone())?;
    debug!(root = %workspace_root.display(), ?config, "resolved configuration");

    // Credentials first: a missing token must fail before any other work
    let token = options.token.as_deref().unwrap_or_default();
    if config.source == SourceKind::Github && token.trim().is_empty() {
        return Err(CliError::Configuration("Missing token".to_string()));
    }

    let context = ActionContext::load(
        options.event_name.as_deref(),
        options.event_path.as_deref(),
        options.repository.as_deref(),
    )?;
    let trigger = context.trigger()?;
    match &trigger {
        Trigger::Push {
            commit_ids,
            before,
            after,
        } => info!(commits = commit_ids.len(), ?before, ?after, "triggered by push"),
        Trigger::PullRequest {
            number,
            base_sha,
            head_sha,
        } => info!(number, ?base_sha, ?head_sha, "triggered by pull request"),
    }

    let source = build_source(&config, options, &context, &workspace_root, token)?;

    let services = discover_service_dirs(
        &workspace_root,
        &config.search_root,
        &marker,
        &config.ignore_dirs,
    )?;
    debug!(services = ?services.iter().collect::<Vec<_>>(), "discovered services");

    let changes = source.fetch(&trigger)?;
    info!(source = source.name(), files = changes.len(), "fetched changed files");
    for file in changes.files() {
        debug!(path = %file.path, status = %file.status, "changed file");
    }

    let classification = Classifier::new(marker).classify(&services, changes.files());
    for (dir, change) in classification.services() {
        debug!(service = dir, status = %change.status, files = change.files.len(), "classified service");
    }
    let buckets = classification.into_summary();
    log_summary(&buckets);

    if let Some(path) = &options.github_output {
        output::write_github_outputs(path, &buckets)?;
    }

    if !options.no_artifact {
        let path = artifact_path(&config, &workspace_root, options.home.as_deref());
        ChangesArtifact::new(buckets.clone(), trigger.commit_ids()).write(&path)?;
        info!(path = %path.display(), "wrote changes artifact");
    }

    Ok(buckets)
}

fn build_source(
    config: &ConfigFile,
    options: &Options,
    context: &ActionContext,
    workspace_root: &Path,
    token: &str,
) -> CliResult<Box<dyn ChangeSource>> {
    match config.source {
        SourceKind::Github => Ok(Box::new(GitHubSource::new(
            config.api_url(),
            token,
            context.repo()?,
        )?)),
        SourceKind::Git => Ok(Box::new(GitSource::new(workspace_root))),
        SourceKind::File => {
            let path = options.changes_from.clone().ok_or_else(|| {
                CliError::Configuration(
                    "the file source needs --changes-from <path>".to_string(),
                )
            })?;
            // Relative to the working directory, like every other path flag
            Ok(Box::new(FileSource::new(path)))
        }
    }
}

/// Configured artifact path (relative to the workspace root), else `~/changes.json`
fn artifact_path(config: &ConfigFile, workspace_root: &Path, home: Option<&Path>) -> PathBuf {
    match &config.artifact_path {
        Some(path) => workspace_root.join(path),
        None => home
            .map(Path::to_path_buf)
            .unwrap_or_else(|| workspace_root.to_path_buf())
            .join(ARTIFACT_FILE_NAME),
    }
}

fn log_summary(buckets: &ServiceBuckets) {
    for status in ServiceStatus::ALL {
        let dirs = buckets.get(status);
        if !dirs.is_empty() {
            info!("{} service(s) {status}: {}", dirs.len(), dirs.join(", "));
        }
    }
    if buckets.is_empty() {
        info!("no services affected");
    }
}
