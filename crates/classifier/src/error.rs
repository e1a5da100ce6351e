/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

/// Top-level error type for the classifier
///
/// Classification itself is infallible; errors only arise while building
/// the inputs it runs on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("Invalid marker filename: {0}")]
    InvalidMarker(String),
}
