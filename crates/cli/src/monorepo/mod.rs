//! Monorepo support for svcdiff
//!
//! This module provides functionality for locating the workspace root and
//! discovering the service directories that currently exist on disk.

mod discovery;
mod workspace;

// Public API
pub use discovery::discover_service_dirs;
pub use workspace::resolve_workspace_root;
