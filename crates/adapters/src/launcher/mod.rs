// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process launching and host introspection
//!
//! Everything that differs between Unix and Windows sits behind
//! [`ProcessLauncher`]: how a shell job is invoked, how a detached process is
//! started, whether the caller may switch users, and whether another
//! process's liveness can be checked.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixLauncher;
#[cfg(windows)]
pub use windows::WindowsLauncher;

/// Launcher for the platform this binary was built for
#[cfg(unix)]
pub type SystemLauncher = UnixLauncher;
#[cfg(windows)]
pub type SystemLauncher = WindowsLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLauncher;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Errors from launching processes
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to open launch log {}: {source}", path.display())]
    Log {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to launch {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
}

/// A process to start in the background
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetachedLaunch {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Receives the launched process's own stdout and stderr; discarded if unset
    pub log: Option<PathBuf>,
}

/// Platform capability used by the executor and the dispatcher
pub trait ProcessLauncher: Clone + Send + Sync + 'static {
    /// Name of the executing host
    fn host_name(&self) -> String;

    /// Whether this process may run commands as another user
    fn is_privileged(&self) -> bool;

    /// `Some(alive)` on platforms that can check process liveness, `None` elsewhere
    fn is_alive(&self, pid: u32) -> Option<bool>;

    fn supports_liveness(&self) -> bool {
        self.is_alive(std::process::id()).is_some()
    }

    /// Command that runs `command` through the platform shell.
    ///
    /// `run_as` is honoured only where users can be switched and this
    /// process is privileged; otherwise the command runs as the current user.
    fn shell_command(&self, command: &str, run_as: Option<&str>) -> Command;

    /// Start a process without waiting for it. Returns its pid.
    fn launch_detached(&self, launch: &DetachedLaunch) -> Result<u32, LaunchError>;
}

/// Stdout/stderr for a detached process: the launch log, or nothing.
fn detached_stdio(log: Option<&Path>) -> Result<(Stdio, Stdio), LaunchError> {
    let Some(path) = log else {
        return Ok((Stdio::null(), Stdio::null()));
    };
    let open_err = |source| LaunchError::Log {
        path: path.to_path_buf(),
        source,
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)?;
    let err = file.try_clone().map_err(open_err)?;
    Ok((Stdio::from(file), Stdio::from(err)))
}
