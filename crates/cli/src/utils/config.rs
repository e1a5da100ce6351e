//! Config file reading utilities
//!
//! Settings are layered: built-in defaults, then `.svcdiff.yaml` at the
//! workspace root, then command-line flags (which also cover environment
//! variables through clap).

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use svcdiff_classifier::DEFAULT_MARKER;

/// Name of the config file looked up at the workspace root
pub const CONFIG_FILE_NAME: &str = ".svcdiff.yaml";

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Where changed files come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// GitHub REST API (commit diffs or pull request files)
    #[default]
    Github,
    /// Local git repository
    Git,
    /// JSON file of changed files
    File,
}

/// Config file structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Filename that marks a directory as a service
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Directory (relative to the workspace root) searched for services
    #[serde(default = "default_search_root")]
    pub search_root: String,
    /// Directory names skipped during discovery
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    #[serde(default)]
    pub source: SourceKind,
    /// Where the changes artifact is written (default: `~/changes.json`)
    pub artifact_path: Option<PathBuf>,
    pub api_url: Option<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            search_root: default_search_root(),
            ignore_dirs: default_ignore_dirs(),
            source: SourceKind::default(),
            artifact_path: None,
            api_url: None,
        }
    }
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_search_root() -> String {
    "services".to_string()
}

fn default_ignore_dirs() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "vendor".to_string(),
        "target".to_string(),
    ]
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub marker: Option<String>,
    pub search_root: Option<String>,
    pub source: Option<SourceKind>,
    pub artifact_path: Option<PathBuf>,
    pub api_url: Option<String>,
}

impl ConfigFile {
    /// Apply command-line overrides on top of this config
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(marker) = &overrides.marker {
            self.marker = marker.clone();
        }
        if let Some(search_root) = &overrides.search_root {
            self.search_root = search_root.clone();
        }
        if let Some(source) = overrides.source {
            self.source = source;
        }
        if let Some(artifact_path) = &overrides.artifact_path {
            self.artifact_path = Some(artifact_path.clone());
        }
        if let Some(api_url) = &overrides.api_url {
            self.api_url = Some(api_url.clone());
        }
        self
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// Read a config file, returning `None` when it does not exist
pub fn read_config(config_path: &Path) -> CliResult<Option<ConfigFile>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let config_content = fs::read_to_string(config_path)
        .map_err(|e| CliError::Configuration(format!("Failed to read config file: {e}")))?;

    // An empty file is valid and means "all defaults"
    if config_content.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }

    let config: ConfigFile = serde_yaml::from_str(&config_content)
        .map_err(|e| CliError::Configuration(format!("Failed to parse config file: {e}")))?;

    Ok(Some(config))
}

/// Load the workspace config, falling back to defaults
pub fn load_config(workspace_root: &Path) -> CliResult<ConfigFile> {
    Ok(read_config(&workspace_root.join(CONFIG_FILE_NAME))?.unwrap_or_default())
}
