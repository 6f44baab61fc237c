// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Windows launcher: `cmd /C`, no user switching, no liveness checks.

use super::{detached_stdio, DetachedLaunch, LaunchError, ProcessLauncher};
use std::os::windows::process::CommandExt;
use std::process::Stdio;
use tokio::process::Command;

const DETACHED_PROCESS: u32 = 0x0000_0008;
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

#[derive(Clone, Copy, Debug, Default)]
pub struct WindowsLauncher;

impl WindowsLauncher {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn shell(command: &str, _switch_to: Option<&str>) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

impl ProcessLauncher for WindowsLauncher {
    fn host_name(&self) -> String {
        std::env::var("COMPUTERNAME").unwrap_or_default()
    }

    fn is_privileged(&self) -> bool {
        false
    }

    fn is_alive(&self, _pid: u32) -> Option<bool> {
        None
    }

    fn shell_command(&self, command: &str, run_as: Option<&str>) -> Command {
        if let Some(user) = run_as {
            tracing::warn!(run_as = user, "run_as is ignored on windows");
        }
        shell(command, None)
    }

    fn launch_detached(&self, launch: &DetachedLaunch) -> Result<u32, LaunchError> {
        let (stdout, stderr) = detached_stdio(launch.log.as_deref())?;
        let child = std::process::Command::new(&launch.program)
            .args(&launch.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: launch.program.clone(),
                source,
            })?;
        Ok(child.id())
    }
}
