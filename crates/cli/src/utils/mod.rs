//! Shared CLI utilities

pub mod config;
