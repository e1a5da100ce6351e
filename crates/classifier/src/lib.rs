//! svcdiff Classifier Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library decides which services in a monorepo were added, modified or
//! removed by a set of source-control changes. A service is any directory that
//! contains (or contained, before deletion) a marker file such as `main.go`.
//! It works only with in-memory data (no file I/O); discovering directories on
//! disk and fetching diffs are the caller's job.
//!
//! # Example
//!
//! ```rust
//! use svcdiff_classifier::{ChangedFile, Classifier, FileStatus, ServiceDirectories, ServiceStatus};
//!
//! let dirs = ServiceDirectories::new(["services/location", "services/events"]);
//! let changes = vec![
//!     ChangedFile::new("services/location/demo.go", FileStatus::Modified),
//!     ChangedFile::new("services/platform-test/main.go", FileStatus::Removed),
//!     ChangedFile::new("services/events/main.go", FileStatus::Added),
//! ];
//!
//! let result = Classifier::default().classify(&dirs, &changes);
//! assert_eq!(result.bucket(ServiceStatus::Added), ["services/events"]);
//! assert_eq!(result.bucket(ServiceStatus::Modified), ["services/location"]);
//! assert_eq!(result.bucket(ServiceStatus::Removed), ["services/platform-test"]);
//! ```

pub mod classifier;
pub mod error;
pub mod marker;
pub mod model;
pub mod resolver;
pub mod result;

// Re-export the public API
pub use classifier::{classify, Classifier};
pub use error::ClassifierError;
pub use marker::{Marker, DEFAULT_MARKER};
pub use model::{ChangeSet, ChangedFile, FileStatus, ServiceStatus};
pub use resolver::{normalize_dir, ServiceDirectories};
pub use result::{Classification, ServiceBuckets, ServiceChange};
