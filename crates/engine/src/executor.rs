// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs a single job end to end.

use crate::job_log::JobLog;
use crate::lock::LockManager;
use jobby_adapters::{notify_all, AlertSender, ProcessLauncher};
use jobby_core::task::{is_success, render_value};
use jobby_core::{
    AlertMessage, CallableTask, Clock, ExecutionResult, JobDefinition,
    JobSettings, JobTicket, LockIdentity, WorkUnit,
};
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use tracing::Instrument;

/// Runs jobs against a [`LockManager`] it owns.
///
/// Each run walks: max-runtime check, should-run checks, lock, execute,
/// release, empty-output cleanup, then logging and alerting by outcome.
pub struct JobExecutor<L, A, C> {
    locks: LockManager,
    launcher: L,
    alerts: A,
    clock: C,
}

impl<L, A, C> JobExecutor<L, A, C>
where
    L: ProcessLauncher,
    A: AlertSender,
    C: Clock,
{
    pub fn new(locks: LockManager, launcher: L, alerts: A, clock: C) -> Self {
        Self {
            locks,
            launcher,
            alerts,
            clock,
        }
    }

    pub fn locks(&self) -> &LockManager {
        &self.locks
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub async fn run_definition(&mut self, job: &JobDefinition) -> ExecutionResult {
        self.run(&job.name, &job.work, &job.settings).await
    }

    pub async fn run_ticket(&mut self, ticket: &JobTicket) -> ExecutionResult {
        self.run(&ticket.name, &ticket.work(), &ticket.settings).await
    }

    /// Run `work` once under the job's lock
    pub async fn run(
        &mut self,
        name: &str,
        work: &WorkUnit,
        settings: &JobSettings,
    ) -> ExecutionResult {
        let span = tracing::info_span!("job.run", job = name);
        self.run_inner(name, work, settings).instrument(span).await
    }

    async fn run_inner(
        &mut self,
        name: &str,
        work: &WorkUnit,
        settings: &JobSettings,
    ) -> ExecutionResult {
        let identity = settings.lock_identity(name);
        let log = JobLog::new(name, settings);

        if let Some(message) = self.check_max_runtime(&identity, settings) {
            let result = ExecutionResult::Failure(message);
            self.report(name, settings, &log, &result).await;
            return result;
        }

        if !self.should_run(name, settings) {
            tracing::debug!("skipped");
            return ExecutionResult::Skipped;
        }

        let result = match self.locks.acquire(&identity) {
            Err(e) if e.is_contention() => ExecutionResult::SoftFailure(e.to_string()),
            Err(e) => ExecutionResult::Failure(e.to_string()),
            Ok(()) => {
                let start = Instant::now();
                let mut result = self.execute(work, settings, &log).await;
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "work finished"
                );

                if let Err(e) = self.locks.release(&identity) {
                    tracing::error!(%identity, error = %e, "failed to release lock");
                    if !result.is_failure() {
                        result = ExecutionResult::Failure(e.to_string());
                    }
                }
                log.remove_if_empty();
                result
            }
        };

        self.report(name, settings, &log, &result).await;
        result
    }

    /// Failure message when a live holder has kept the lock too long
    fn check_max_runtime(
        &self,
        identity: &LockIdentity,
        settings: &JobSettings,
    ) -> Option<String> {
        let max = settings.max_runtime_secs?;
        if !self.launcher.supports_liveness() {
            return Some("'max_runtime' is not supported on this platform".to_string());
        }
        let launcher = &self.launcher;
        let age = self
            .locks
            .age_secs(identity, |pid| launcher.is_alive(pid).unwrap_or(false));
        (age >= max)
            .then(|| format!("MaxRuntime of {max} secs exceeded! Current runtime: {age} secs"))
    }

    fn should_run(&self, name: &str, settings: &JobSettings) -> bool {
        if !settings.enabled {
            return false;
        }
        if let Some(dir) = &settings.halt_dir {
            if dir.join(name).exists() {
                return false;
            }
        }
        settings
            .host_affinity
            .eq_ignore_ascii_case(&self.launcher.host_name())
    }

    async fn execute(
        &self,
        work: &WorkUnit,
        settings: &JobSettings,
        log: &JobLog<'_>,
    ) -> ExecutionResult {
        match work {
            WorkUnit::Shell(command) => self.run_shell(command, settings, log).await,
            WorkUnit::Callable(task) => run_callable(task, log).await,
        }
    }

    async fn run_shell(
        &self,
        command: &str,
        settings: &JobSettings,
        log: &JobLog<'_>,
    ) -> ExecutionResult {
        let (stdout, stderr) = match log.capture_stdio() {
            Ok(stdio) => stdio,
            Err(e) => return ExecutionResult::Failure(format!("Unable to open output file: {e}")),
        };
        let mut cmd = self.launcher.shell_command(command, settings.run_as.as_deref());
        cmd.stdin(Stdio::null()).stdout(stdout).stderr(stderr);

        match cmd.status().await {
            Ok(status) if status.success() => ExecutionResult::Success,
            Ok(status) => ExecutionResult::Failure(format!(
                "Job exited with status '{}'.",
                exit_code(status)
            )),
            Err(e) => ExecutionResult::Failure(format!("Unable to start job: {e}")),
        }
    }

    async fn report(
        &self,
        name: &str,
        settings: &JobSettings,
        log: &JobLog<'_>,
        result: &ExecutionResult,
    ) {
        if let Some(line) = result.log_line() {
            log.line(self.clock.now(), &line);
        }
        match result {
            ExecutionResult::Success => tracing::info!("job succeeded"),
            ExecutionResult::Skipped => {}
            ExecutionResult::SoftFailure(msg) => tracing::info!(reason = %msg, "job not run"),
            ExecutionResult::Failure(msg) => {
                tracing::error!(error = %msg, "job failed");
                let host = self.launcher.host_name();
                let message = AlertMessage::new(name, &host, settings.output_hint(), msg);
                notify_all(&self.alerts, &settings.alerts, &message).await;
            }
        }
    }
}

/// Run a callable on the blocking pool with its output buffered.
///
/// The buffer is flushed to the stdout capture whether the callable returns,
/// errors or panics. Errors and panics are recorded as `Error! <message>` and
/// their message becomes the return value.
async fn run_callable(task: &CallableTask, log: &JobLog<'_>) -> ExecutionResult {
    let task = task.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let mut out = Vec::new();
        let returned = std::panic::catch_unwind(AssertUnwindSafe(|| task.call(&mut out)));
        (out, returned)
    })
    .await;
    let (out, returned) = match joined {
        Ok(parts) => parts,
        Err(e) => return ExecutionResult::Failure(format!("Callable did not complete: {e}")),
    };

    if !out.is_empty() {
        log.append_stdout(&out);
    }
    let value = match returned {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => error_value(log, e.to_string()),
        Err(panic) => error_value(log, panic_message(&*panic)),
    };

    if is_success(&value) {
        ExecutionResult::Success
    } else {
        ExecutionResult::Failure(format!(
            "Closure did not return true! Returned:\n{}",
            render_value(&value)
        ))
    }
}

fn error_value(log: &JobLog<'_>, message: String) -> Value {
    log.append_stderr(format!("Error! {message}\n").as_bytes());
    Value::String(message)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "callable panicked".to_string()
    }
}

/// Exit code, with signal deaths reported the way a shell does (128 + signal)
fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    status.code().unwrap_or(-1)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
