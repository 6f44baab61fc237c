// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake launcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DetachedLaunch, LaunchError, ProcessLauncher};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::process::Command;

#[cfg(unix)]
use super::unix::{probe, shell};
#[cfg(windows)]
use super::windows::shell;

struct FakeLauncherState {
    host: String,
    privileged: bool,
    liveness: bool,
    fail_launches: bool,
    next_pid: u32,
    launches: Vec<DetachedLaunch>,
}

/// Fake launcher for testing.
///
/// Host identity, privilege and liveness support are configurable. Shell
/// commands still run for real through the platform shell; detached
/// launches are only recorded.
#[derive(Clone)]
pub struct FakeLauncher {
    inner: Arc<Mutex<FakeLauncherState>>,
}

impl FakeLauncher {
    pub fn new(host: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeLauncherState {
                host: host.to_string(),
                privileged: false,
                liveness: cfg!(unix),
                fail_launches: false,
                next_pid: 40_000,
                launches: Vec::new(),
            })),
        }
    }

    pub fn set_privileged(&self, privileged: bool) {
        self.inner.lock().privileged = privileged;
    }

    /// Behave like a platform that cannot check liveness
    pub fn without_liveness(self) -> Self {
        self.inner.lock().liveness = false;
        self
    }

    /// Make every detached launch fail
    pub fn fail_launches(&self) {
        self.inner.lock().fail_launches = true;
    }

    /// Get all recorded detached launches
    pub fn launches(&self) -> Vec<DetachedLaunch> {
        self.inner.lock().launches.clone()
    }
}

impl ProcessLauncher for FakeLauncher {
    fn host_name(&self) -> String {
        self.inner.lock().host.clone()
    }

    fn is_privileged(&self) -> bool {
        self.inner.lock().privileged
    }

    fn is_alive(&self, pid: u32) -> Option<bool> {
        if !self.inner.lock().liveness {
            return None;
        }
        #[cfg(unix)]
        return Some(probe(pid));
        #[cfg(not(unix))]
        return Some(pid == std::process::id());
    }

    fn shell_command(&self, command: &str, run_as: Option<&str>) -> Command {
        shell(command, run_as.filter(|_| self.is_privileged()))
    }

    fn launch_detached(&self, launch: &DetachedLaunch) -> Result<u32, LaunchError> {
        let mut inner = self.inner.lock();
        if inner.fail_launches {
            return Err(LaunchError::Spawn {
                program: launch.program.clone(),
                source: std::io::Error::other("configured to fail"),
            });
        }
        inner.launches.push(launch.clone());
        inner.next_pid += 1;
        Ok(inner.next_pid)
    }
}
