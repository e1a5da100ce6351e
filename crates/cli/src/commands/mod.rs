//! CLI commands

pub mod classify;
pub mod completion;
pub mod detect;
pub mod services;
