//! Classification result types

use crate::model::{ChangedFile, ServiceStatus};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Service directories grouped by status, in derivation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBuckets {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
}

impl ServiceBuckets {
    pub fn get(&self, status: ServiceStatus) -> &[String] {
        match status {
            ServiceStatus::Added => &self.added,
            ServiceStatus::Modified => &self.modified,
            ServiceStatus::Removed => &self.removed,
        }
    }

    fn get_mut(&mut self, status: ServiceStatus) -> &mut Vec<String> {
        match status {
            ServiceStatus::Added => &mut self.added,
            ServiceStatus::Modified => &mut self.modified,
            ServiceStatus::Removed => &mut self.removed,
        }
    }

    /// Bucket contents joined for CLI or environment export
    pub fn joined(&self, status: ServiceStatus, separator: &str) -> String {
        self.get(status).join(separator)
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }
}

/// Per-service classification details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceChange {
    pub status: ServiceStatus,
    pub files: Vec<ChangedFile>,
}

/// Outcome of classifying one change set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    buckets: ServiceBuckets,
    services: IndexMap<String, ServiceChange>,
}

impl Classification {
    pub(crate) fn record(&mut self, dir: String, status: ServiceStatus, files: Vec<ChangedFile>) {
        self.buckets.get_mut(status).push(dir.clone());
        self.services.insert(dir, ServiceChange { status, files });
    }

    /// Directories assigned `status`, in the order they were classified
    pub fn bucket(&self, status: ServiceStatus) -> &[String] {
        self.buckets.get(status)
    }

    pub fn status_of(&self, dir: &str) -> Option<ServiceStatus> {
        self.services.get(dir).map(|change| change.status)
    }

    /// Changed files attributed to `dir`
    pub fn files_for(&self, dir: &str) -> Option<&[ChangedFile]> {
        self.services.get(dir).map(|change| change.files.as_slice())
    }

    /// All classified directories with their details, in classification order
    pub fn services(&self) -> impl Iterator<Item = (&str, &ServiceChange)> {
        self.services
            .iter()
            .map(|(dir, change)| (dir.as_str(), change))
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn summary(&self) -> &ServiceBuckets {
        &self.buckets
    }

    pub fn into_summary(self) -> ServiceBuckets {
        self.buckets
    }
}
