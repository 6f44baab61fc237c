// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for locking and dispatch

use jobby_adapters::LaunchError;
use jobby_core::JobError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from [`LockManager`](crate::LockManager).
///
/// Messages name the lock file so they can go straight into a job's log.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("Lock already acquired (Lockfile: {}).", path.display())]
    AlreadyHeldLocally { path: PathBuf },
    #[error("Unable to create file (File: {}).", path.display())]
    CannotCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to open file (File: {}).", path.display())]
    CannotOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Job is still locked (Lockfile: {})!", path.display())]
    Contended { path: PathBuf },
    #[error("Lock NOT held - bug? Lockfile: {}", path.display())]
    NotHeld { path: PathBuf },
    #[error("Lock file I/O failed (Lockfile: {}): {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LockError {
    /// Another holder has the lock: expected, never alerted
    pub fn is_contention(&self) -> bool {
        matches!(self, Self::Contended { .. })
    }
}

/// Errors raised while registering or dispatching jobs
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("job '{0}' is already registered")]
    DuplicateJob(String),
    #[error(transparent)]
    Job(#[from] JobError),
    #[error("failed to encode ticket: {0}")]
    Ticket(#[from] serde_json::Error),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}
