// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unix launcher: `sh -c`, `sudo -u` and signal-0 liveness checks.

use super::{detached_stdio, DetachedLaunch, LaunchError, ProcessLauncher};
use nix::sys::signal::kill;
use nix::unistd::{geteuid, gethostname, Pid};
use std::os::unix::process::CommandExt;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Clone, Copy, Debug, Default)]
pub struct UnixLauncher;

impl UnixLauncher {
    pub fn new() -> Self {
        Self
    }
}

/// `sh -c <command>`, prefixed with `sudo -u <user>` when switching users
pub(crate) fn shell(command: &str, switch_to: Option<&str>) -> Command {
    match switch_to {
        Some(user) => {
            let mut cmd = Command::new("sudo");
            cmd.args(["-u", user, "sh", "-c", command]);
            cmd
        }
        None => {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        }
    }
}

/// Signal 0 probes for existence without delivering anything. A pid we may
/// not signal (EPERM) counts as not alive.
pub(crate) fn probe(pid: u32) -> bool {
    match i32::try_from(pid) {
        Ok(raw) if raw > 0 => kill(Pid::from_raw(raw), None).is_ok(),
        _ => false,
    }
}

impl ProcessLauncher for UnixLauncher {
    fn host_name(&self) -> String {
        match gethostname() {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read host name");
                String::new()
            }
        }
    }

    fn is_privileged(&self) -> bool {
        geteuid().is_root()
    }

    fn is_alive(&self, pid: u32) -> Option<bool> {
        Some(probe(pid))
    }

    fn shell_command(&self, command: &str, run_as: Option<&str>) -> Command {
        let switch_to = run_as.filter(|_| self.is_privileged());
        if run_as.is_some() && switch_to.is_none() {
            tracing::debug!(run_as, "not root, running as current user");
        }
        shell(command, switch_to)
    }

    #[allow(clippy::zombie_processes)]
    fn launch_detached(&self, launch: &DetachedLaunch) -> Result<u32, LaunchError> {
        let (stdout, stderr) = detached_stdio(launch.log.as_deref())?;
        // Own process group so terminal signals aimed at the dispatcher
        // do not reach the job. The child is never waited on; it is
        // reparented once the dispatcher exits.
        let child = std::process::Command::new(&launch.program)
            .args(&launch.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .process_group(0)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: launch.program.clone(),
                source,
            })?;
        Ok(child.id())
    }
}

#[cfg(test)]
#[path = "unix_tests.rs"]
mod tests;
