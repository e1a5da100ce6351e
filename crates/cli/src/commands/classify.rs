//! Classify command implementation
//!
//! Offline classification: changed files come from a JSON file and service
//! directories either from `--service` flags or from discovery. No trigger,
//! token or network access is involved.

use crate::error::CliResult;
use crate::monorepo::{discover_service_dirs, resolve_workspace_root};
use crate::output::{self, OutputFormat};
use crate::sources::FileSource;
use crate::utils::config::{load_config, Overrides};
use serde::Serialize;
use std::path::PathBuf;
use svcdiff_classifier::{Classification, Classifier, Marker, ServiceChange, ServiceDirectories};
use tracing::debug;

pub struct Options {
    /// JSON file of changed files
    pub changes: PathBuf,
    /// Explicit service directories; discovery runs when empty
    pub services: Vec<String>,
    pub workspace_root: Option<PathBuf>,
    pub overrides: Overrides,
    pub format: OutputFormat,
    /// Include per-service file attribution
    pub details: bool,
}

#[derive(Serialize)]
struct ServiceDetail<'a> {
    dir: &'a str,
    #[serde(flatten)]
    change: &'a ServiceChange,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options).and_then(|classification| render(&classification, options)) {
        Ok(rendered) => {
            println!("{rendered}");
            0
        }
        Err(e) => {
            eprintln!("✗ Classification failed");
            eprintln!("  Error: {e}");
            e.exit_code()
        }
    }
}

fn run_inner(options: &Options) -> CliResult<Classification> {
    let workspace_root = resolve_workspace_root(options.workspace_root.as_deref())?;
    let config = load_config(&workspace_root)?.with_overrides(&options.overrides);
    let marker = Marker::new(config.marker.clone())?;

    let dirs = if options.services.is_empty() {
        discover_service_dirs(
            &workspace_root,
            &config.search_root,
            &marker,
            &config.ignore_dirs,
        )?
    } else {
        ServiceDirectories::new(options.services.iter().map(String::as_str))
    };
    debug!(services = dirs.len(), "using service directories");

    let changes = FileSource::new(&options.changes).read()?;
    debug!(files = changes.len(), "read changed files");

    Ok(Classifier::new(marker).classify(&dirs, changes.files()))
}

fn render(classification: &Classification, options: &Options) -> CliResult<String> {
    let summary = output::render(classification.summary(), options.format)?;
    if !options.details {
        return Ok(summary);
    }

    match options.format {
        OutputFormat::Text => {
            let mut lines = vec![summary];
            for (dir, change) in classification.services() {
                lines.push(format!("{dir} ({}):", change.status));
                for file in &change.files {
                    lines.push(format!("  {} {}", file.status, file.path));
                }
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => {
            let details: Vec<ServiceDetail> = classification
                .services()
                .map(|(dir, change)| ServiceDetail { dir, change })
                .collect();
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "services": classification.summary(),
                "details": details,
            }))?)
        }
    }
}
