//! svcdiff CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod context;
mod error;
mod monorepo;
mod output;
mod sources;
mod utils;

#[cfg(test)]
mod test_helpers;

use clap::{Args, CommandFactory, Parser, Subcommand};
use commands::{classify, completion, detect, services};
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use utils::config::{Overrides, SourceKind};

/// svcdiff - Detect which services a change touches
#[derive(Parser)]
#[command(name = "svcdiff")]
#[command(about = "Detect added, modified and removed services from changed files", long_about = None)]
#[command(version = env!("SVCDIFF_VERSION"))]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every command that looks at the workspace
#[derive(Args)]
struct WorkspaceArgs {
    /// Workspace root (auto-detected if not provided)
    #[arg(long)]
    workspace_root: Option<PathBuf>,
    /// Filename that marks a service directory (default: main.go)
    #[arg(long)]
    marker: Option<String>,
    /// Directory searched for services, relative to the workspace root (default: services)
    #[arg(long)]
    search_root: Option<String>,
}

impl WorkspaceArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            marker: self.marker.clone(),
            search_root: self.search_root.clone(),
            ..Overrides::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the services changed by the current push or pull request
    Detect {
        #[command(flatten)]
        workspace: WorkspaceArgs,
        /// Where changed files come from
        #[arg(long, value_enum)]
        source: Option<SourceKind>,
        /// Read changed files from a JSON file instead, relative to the current directory (implies --source file)
        #[arg(long)]
        changes_from: Option<PathBuf>,
        /// API token for the github source
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// REST API base URL
        #[arg(long, env = "GITHUB_API_URL")]
        api_url: Option<String>,
        /// Name of the triggering event
        #[arg(long, env = "GITHUB_EVENT_NAME")]
        event_name: Option<String>,
        /// Path to the event payload JSON
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        event_path: Option<PathBuf>,
        /// Repository slug (owner/name)
        #[arg(long, env = "GITHUB_REPOSITORY")]
        repository: Option<String>,
        /// Append services_* step outputs to this file
        #[arg(long, env = "GITHUB_OUTPUT")]
        github_output: Option<PathBuf>,
        /// Changes artifact path (default: ~/changes.json)
        #[arg(long)]
        artifact: Option<PathBuf>,
        /// Do not write the changes artifact
        #[arg(long, conflicts_with = "artifact")]
        no_artifact: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Classify a JSON list of changed files without a workflow context
    Classify {
        /// JSON file of changed files ([{"path": ..., "status": ...}]), relative to the current directory
        #[arg(long)]
        changes: PathBuf,
        /// Service directory (repeatable; discovered when omitted)
        #[arg(long = "service")]
        services: Vec<String>,
        #[command(flatten)]
        workspace: WorkspaceArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Show which files were attributed to each service
        #[arg(long)]
        details: bool,
    },
    /// List the service directories found in the workspace
    Services {
        #[command(flatten)]
        workspace: WorkspaceArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = services::ListFormat::Table)]
        format: services::ListFormat,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell type (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}

/// Clap command structure, used for shell completion generation
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,svcdiff={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Detect {
            workspace,
            source,
            changes_from,
            token,
            api_url,
            event_name,
            event_path,
            repository,
            github_output,
            artifact,
            no_artifact,
            format,
        } => {
            let opts = detect::Options {
                workspace_root: workspace.workspace_root.clone(),
                overrides: Overrides {
                    source,
                    artifact_path: artifact,
                    api_url,
                    ..workspace.overrides()
                },
                changes_from,
                token,
                event_name,
                event_path,
                repository,
                github_output,
                home: dirs::home_dir(),
                no_artifact,
                format,
            };
            detect::run(&opts)
        }
        Commands::Classify {
            changes,
            services,
            workspace,
            format,
            details,
        } => {
            let opts = classify::Options {
                changes,
                services,
                overrides: workspace.overrides(),
                workspace_root: workspace.workspace_root,
                format,
                details,
            };
            classify::run(&opts)
        }
        Commands::Services { workspace, format } => {
            let opts = services::Options {
                overrides: workspace.overrides(),
                workspace_root: workspace.workspace_root,
                format,
            };
            services::run(&opts)
        }
        Commands::Completion { shell } => {
            let opts = completion::Options { shell };
            completion::run(&opts)
        }
    };

    std::process::exit(exit_code);
}
