// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

/// Job file override (JOBBY_CONFIG)
pub fn config_path() -> Option<PathBuf> {
    non_empty("JOBBY_CONFIG").map(PathBuf::from)
}

/// Default environment label for every job (APPLICATION_ENV)
pub fn application_env() -> Option<String> {
    non_empty("APPLICATION_ENV")
}

/// Log filter directives: JOBBY_LOG > RUST_LOG
pub fn log_filter() -> Option<String> {
    non_empty("JOBBY_LOG").or_else(|| non_empty("RUST_LOG"))
}

/// Send process logs to this file instead of stderr (JOBBY_LOG_FILE)
pub fn log_file() -> Option<PathBuf> {
    non_empty("JOBBY_LOG_FILE").map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
