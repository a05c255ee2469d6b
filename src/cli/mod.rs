//! Command-line interface for reelmeta.
//!
//! This module provides CLI commands for searching providers, fetching
//! records by ID, and inspecting the cache.

mod commands;

pub use commands::{Cli, Commands, run_command};
