//! Services command implementation
//!
//! Lists the service directories discovered under the search root, in the
//! longest-first order the classifier attributes files in.

use crate::error::CliResult;
use crate::monorepo::{discover_service_dirs, resolve_workspace_root};
use crate::utils::config::{load_config, Overrides};
use serde::Serialize;
use std::path::PathBuf;
use svcdiff_classifier::{Marker, ServiceDirectories};

/// Output format for the services list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

pub struct Options {
    pub workspace_root: Option<PathBuf>,
    pub overrides: Overrides,
    pub format: ListFormat,
}

/// Service information for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub path: String,
}

impl ServiceInfo {
    fn from_dir(dir: &str) -> Self {
        let name = dir.rsplit('/').next().unwrap_or(dir);
        Self {
            name: name.to_string(),
            path: dir.to_string(),
        }
    }
}

/// Run the services command
pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(services) => {
            match options.format {
                ListFormat::Table => print_simple_table(&services),
                ListFormat::Json => match serde_json::to_string_pretty(&services) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return 1;
                    }
                },
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

fn run_inner(options: &Options) -> CliResult<Vec<ServiceInfo>> {
    let workspace_root = resolve_workspace_root(options.workspace_root.as_deref())?;
    let config = load_config(&workspace_root)?.with_overrides(&options.overrides);
    let marker = Marker::new(config.marker.clone())?;

    let dirs = discover_service_dirs(
        &workspace_root,
        &config.search_root,
        &marker,
        &config.ignore_dirs,
    )?;
    Ok(service_infos(&dirs))
}

fn service_infos(dirs: &ServiceDirectories) -> Vec<ServiceInfo> {
    dirs.iter().map(ServiceInfo::from_dir).collect()
}

fn print_simple_table(services: &[ServiceInfo]) {
    if services.is_empty() {
        println!("No services found");
        return;
    }

    println!("Services:");
    println!("{:-<80}", "");
    println!("{:<30} {:<50}", "Name", "Path");
    println!("{:-<80}", "");

    for service in services {
        println!("{:<30} {:<50}", service.name, service.path);
    }
}
