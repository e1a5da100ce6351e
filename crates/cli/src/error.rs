//! CLI error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// A required input (e.g. the access token) is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The run was triggered by something other than a push or pull request
    #[error("Unsupported trigger: {0}")]
    UnsupportedTrigger(String),

    #[error("Failed to fetch changed files: {0}")]
    UpstreamFetch(String),

    #[error("Service discovery failed: {0}")]
    Discovery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Classifier error: {0}")]
    Classifier(#[from] svcdiff_classifier::ClassifierError),

    #[error("{0}")]
    Message(String),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Classifier(_) => 2,
            Self::UnsupportedTrigger(_) => 3,
            Self::UpstreamFetch(_) => 4,
            Self::Discovery(_) => 5,
            Self::Io(_) | Self::Json(_) | Self::Message(_) => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
