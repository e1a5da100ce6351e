//! Result output: stdout rendering, workflow step outputs and the changes artifact

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use svcdiff_classifier::{ServiceBuckets, ServiceStatus};

/// Output format for results printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `status: dir dir ...` line per bucket
    #[default]
    Text,
    /// The buckets as a JSON object
    Json,
}

/// Record persisted for downstream workflow steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesArtifact {
    pub services: ServiceBuckets,
    pub commit_ids: Vec<String>,
}

impl ChangesArtifact {
    pub fn new(services: ServiceBuckets, commit_ids: Vec<String>) -> Self {
        Self {
            services,
            commit_ids,
        }
    }

    /// Write the artifact as JSON, creating parent directories as needed
    pub fn write(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| {
            CliError::Message(format!(
                "Failed to write changes artifact {}: {e}",
                path.display()
            ))
        })
    }
}

/// Render buckets for the terminal
pub fn render(buckets: &ServiceBuckets, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(buckets, " ")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(buckets)?),
    }
}

/// `added: a b` style lines, one per bucket
pub fn render_text(buckets: &ServiceBuckets, separator: &str) -> String {
    ServiceStatus::ALL
        .iter()
        .map(|status| format!("{status}: {}", buckets.joined(*status, separator)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append `services_<status>=...` lines to a workflow output file
pub fn write_github_outputs(path: &Path, buckets: &ServiceBuckets) -> CliResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            CliError::Message(format!(
                "Failed to open workflow output file {}: {e}",
                path.display()
            ))
        })?;

    for status in ServiceStatus::ALL {
        writeln!(file, "services_{status}={}", buckets.joined(status, " "))?;
    }
    Ok(())
}
