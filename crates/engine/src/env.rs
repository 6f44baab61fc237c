// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;
use std::time::Duration;

/// Directory holding lock files (default: the system temp dir).
pub fn lock_dir() -> PathBuf {
    std::env::var_os("JOBBY_LOCK_DIR")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// Pause between lock attempts (default: 250us).
pub fn lock_retry_delay() -> Duration {
    std::env::var("JOBBY_LOCK_RETRY_US")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_micros)
        .unwrap_or(Duration::from_micros(250))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
