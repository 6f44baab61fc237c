// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-tick dispatch of due jobs.

use crate::error::DispatchError;
use crate::executor::JobExecutor;
use chrono::NaiveDateTime;
use jobby_adapters::{AlertSender, DetachedLaunch, ProcessLauncher};
use jobby_core::{is_due, Clock, ExecutionResult, JobDefinition, JobTicket, WorkUnit};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Instrument;

/// Subcommand of the binary that runs one ticket
pub const RUN_JOB_COMMAND: &str = "run-job";

/// How due jobs are started
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Each shell job in its own detached process
    #[default]
    Detached,
    /// Every job in this process, one after another
    Foreground,
}

#[derive(Clone, Debug)]
pub struct DispatcherConfig {
    /// Binary spawned for detached jobs; must accept `run-job --ticket <json>`
    pub program: PathBuf,
    /// Receives the spawned processes' own stdout and stderr
    pub debug_log: Option<PathBuf>,
    pub mode: DispatchMode,
}

/// What happened to one job during a tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Disabled,
    NotDue,
    /// Handed to a detached process
    Launched { pid: u32 },
    /// Run to completion in this process
    Ran(ExecutionResult),
    /// Could not be evaluated or launched; other jobs are unaffected
    Error(String),
}

#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub outcomes: Vec<(String, DispatchOutcome)>,
}

impl TickReport {
    pub fn outcome(&self, name: &str) -> Option<&DispatchOutcome> {
        self.outcomes
            .iter()
            .find(|(job, _)| job == name)
            .map(|(_, outcome)| outcome)
    }

    pub fn launched(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Launched { .. }))
    }

    pub fn ran(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Ran(_)))
    }

    pub fn errors(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Error(_)))
    }

    fn count(&self, pred: impl Fn(&DispatchOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Owns the registered jobs for one scheduling run.
pub struct Dispatcher<L, A, C> {
    jobs: Vec<JobDefinition>,
    config: DispatcherConfig,
    executor: JobExecutor<L, A, C>,
}

impl<L, A, C> Dispatcher<L, A, C>
where
    L: ProcessLauncher,
    A: AlertSender,
    C: Clock,
{
    pub fn new(config: DispatcherConfig, executor: JobExecutor<L, A, C>) -> Self {
        Self {
            jobs: Vec::new(),
            config,
            executor,
        }
    }

    /// Register a job. Names are unique.
    pub fn add(&mut self, job: JobDefinition) -> Result<(), DispatchError> {
        if self.jobs.iter().any(|j| j.name == job.name) {
            return Err(DispatchError::DuplicateJob(job.name));
        }
        self.jobs.push(job);
        Ok(())
    }

    pub fn jobs(&self) -> &[JobDefinition] {
        &self.jobs
    }

    pub fn executor(&self) -> &JobExecutor<L, A, C> {
        &self.executor
    }

    /// Start every enabled job due at `now`, in registration order.
    ///
    /// Returns once detached jobs are launched, without waiting for them.
    /// A job that fails to evaluate or launch is reported and skipped.
    pub async fn tick(&mut self, now: NaiveDateTime) -> TickReport {
        let span = tracing::info_span!("dispatch.tick", %now);
        self.tick_inner(now).instrument(span).await
    }

    async fn tick_inner(&mut self, now: NaiveDateTime) -> TickReport {
        let Self {
            jobs,
            config,
            executor,
        } = self;
        let mut report = TickReport::default();

        for job in jobs.iter() {
            let outcome = if !job.settings.enabled {
                DispatchOutcome::Disabled
            } else {
                match is_due(&job.schedule, now) {
                    Ok(false) => DispatchOutcome::NotDue,
                    Ok(true) => match dispatch(config, executor, job).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            tracing::error!(job = %job.name, error = %e, "failed to dispatch job");
                            DispatchOutcome::Error(e.to_string())
                        }
                    },
                    Err(e) => {
                        tracing::error!(job = %job.name, error = %e, "failed to evaluate schedule");
                        DispatchOutcome::Error(e.to_string())
                    }
                }
            };
            report.outcomes.push((job.name.clone(), outcome));
        }

        tracing::info!(
            jobs = report.outcomes.len(),
            launched = report.launched(),
            ran = report.ran(),
            errors = report.errors(),
            "tick complete"
        );
        report
    }
}

async fn dispatch<L, A, C>(
    config: &DispatcherConfig,
    executor: &mut JobExecutor<L, A, C>,
    job: &JobDefinition,
) -> Result<DispatchOutcome, DispatchError>
where
    L: ProcessLauncher,
    A: AlertSender,
    C: Clock,
{
    let in_process = match (&job.work, config.mode) {
        (_, DispatchMode::Foreground) => true,
        // cannot cross a process boundary
        (WorkUnit::Callable(_), DispatchMode::Detached) => {
            tracing::debug!(job = %job.name, "callable runs in-process");
            true
        }
        (WorkUnit::Shell(_), DispatchMode::Detached) => false,
    };
    if in_process {
        return Ok(DispatchOutcome::Ran(executor.run_definition(job).await));
    }

    let ticket = JobTicket::from_definition(job)?.encode()?;
    let launch = DetachedLaunch {
        program: config.program.clone(),
        args: vec![RUN_JOB_COMMAND.to_string(), "--ticket".to_string(), ticket],
        log: config.debug_log.clone(),
    };
    let pid = executor.launcher().launch_detached(&launch)?;
    tracing::info!(job = %job.name, pid, "job launched");
    Ok(DispatchOutcome::Launched { pid })
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
