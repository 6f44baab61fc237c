// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job definitions, their options, and the ticket handed to a job's own process.

use crate::alert::AlertTarget;
use crate::lock_id::LockIdentity;
use crate::schedule::{ScheduleError, ScheduleSpec};
use crate::task::CallableTask;
use crate::time_fmt::{TimeFormatError, TimestampFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while registering a job
#[derive(Debug, Error)]
pub enum JobError {
    #[error("job name must not be empty")]
    EmptyName,
    #[error("job '{0}' has an empty command")]
    EmptyCommand(String),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    TimestampFormat(#[from] TimeFormatError),
    #[error("'max_runtime' must be greater than zero")]
    ZeroMaxRuntime,
    #[error("'{0}' must not be blank")]
    Blank(&'static str),
    #[error("job '{0}' runs a callable, which cannot be handed to another process")]
    CallableNotTransferable(String),
}

/// The executable payload of a job
#[derive(Clone, Debug)]
pub enum WorkUnit {
    /// Run through the platform shell
    Shell(String),
    /// Run in-process; never crosses a process boundary
    Callable(CallableTask),
}

/// Capture files for a job's standard output and standard error
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<PathBuf>,
}

impl OutputPaths {
    /// Both streams appended to the same file
    pub fn shared(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            stdout: Some(path.clone()),
            stderr: Some(path),
        }
    }
}

/// Every recognized job option, each optional so that layers (built-in
/// defaults, file-wide defaults, per-job values) can be merged.
///
/// See [`JobSettings::resolve`] for the defaults applied to unset options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Seconds a run may hold its lock before the next run reports it
    pub max_runtime: Option<u64>,
    /// Unix user to run shell commands as (needs root)
    pub run_as: Option<String>,
    /// Label prefixed to the lock identity
    pub environment: Option<String>,
    /// Host the job is pinned to; defaults to the host registering it
    pub run_on_host: Option<String>,
    /// Capture file for both streams, unless overridden per stream
    pub output: Option<PathBuf>,
    pub output_stdout: Option<PathBuf>,
    pub output_stderr: Option<PathBuf>,
    /// strftime pattern for log line timestamps
    pub date_format: Option<String>,
    pub enabled: Option<bool>,
    /// A file named after the job in this directory disables it
    pub halt_dir: Option<PathBuf>,
    pub alerts: Option<Vec<AlertTarget>>,
}

impl JobConfig {
    /// Field-wise merge: values set on `self` win over `fallback`.
    pub fn or(self, fallback: &JobConfig) -> JobConfig {
        JobConfig {
            max_runtime: self.max_runtime.or(fallback.max_runtime),
            run_as: self.run_as.or_else(|| fallback.run_as.clone()),
            environment: self.environment.or_else(|| fallback.environment.clone()),
            run_on_host: self.run_on_host.or_else(|| fallback.run_on_host.clone()),
            output: self.output.or_else(|| fallback.output.clone()),
            output_stdout: self.output_stdout.or_else(|| fallback.output_stdout.clone()),
            output_stderr: self.output_stderr.or_else(|| fallback.output_stderr.clone()),
            date_format: self.date_format.or_else(|| fallback.date_format.clone()),
            enabled: self.enabled.or(fallback.enabled),
            halt_dir: self.halt_dir.or_else(|| fallback.halt_dir.clone()),
            alerts: self.alerts.or_else(|| fallback.alerts.clone()),
        }
    }
}

/// Resolved, validated options of one job
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSettings {
    pub max_runtime_secs: Option<u64>,
    pub run_as: Option<String>,
    /// Compared case-insensitively with the executing host's name
    pub host_affinity: String,
    pub enabled: bool,
    pub halt_dir: Option<PathBuf>,
    pub environment: Option<String>,
    pub output: OutputPaths,
    pub timestamp_format: TimestampFormat,
    pub alerts: Vec<AlertTarget>,
}

impl JobSettings {
    /// Defaults for a job pinned to `host`
    pub fn new(host: &str) -> Self {
        Self {
            max_runtime_secs: None,
            run_as: None,
            host_affinity: host.to_string(),
            enabled: true,
            halt_dir: None,
            environment: None,
            output: OutputPaths::default(),
            timestamp_format: TimestampFormat::default(),
            alerts: Vec::new(),
        }
    }

    /// Apply defaults to `config` and validate it.
    ///
    /// | option | default |
    /// |---|---|
    /// | `enabled` | `true` |
    /// | `run_on_host` | `host` |
    /// | `date_format` | `%Y-%m-%d %H:%M:%S` |
    /// | `output_stdout`, `output_stderr` | `output` |
    /// | everything else | unset |
    pub fn resolve(config: &JobConfig, host: &str) -> Result<Self, JobError> {
        if config.max_runtime == Some(0) {
            return Err(JobError::ZeroMaxRuntime);
        }
        let run_as = non_blank(config.run_as.as_deref(), "run_as")?;
        let host_affinity = non_blank(config.run_on_host.as_deref(), "run_on_host")?
            .unwrap_or_else(|| host.to_string());
        let timestamp_format = match &config.date_format {
            Some(pattern) => TimestampFormat::parse(pattern)?,
            None => TimestampFormat::default(),
        };

        Ok(Self {
            max_runtime_secs: config.max_runtime,
            run_as,
            host_affinity,
            enabled: config.enabled.unwrap_or(true),
            halt_dir: config.halt_dir.clone(),
            environment: config.environment.clone().filter(|e| !e.is_empty()),
            output: OutputPaths {
                stdout: config.output_stdout.clone().or_else(|| config.output.clone()),
                stderr: config.output_stderr.clone().or_else(|| config.output.clone()),
            },
            timestamp_format,
            alerts: config.alerts.clone().unwrap_or_default(),
        })
    }

    pub fn lock_identity(&self, name: &str) -> LockIdentity {
        LockIdentity::new(self.environment.as_deref(), name)
    }

    /// Where lifecycle errors end up: the stderr capture, else stdout
    pub fn output_hint(&self) -> Option<&Path> {
        self.output
            .stderr
            .as_deref()
            .or(self.output.stdout.as_deref())
    }
}

fn non_blank(value: Option<&str>, field: &'static str) -> Result<Option<String>, JobError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(JobError::Blank(field)),
        Some(v) => Ok(Some(v.trim().to_string())),
        None => Ok(None),
    }
}

/// A registered job. Immutable once built.
#[derive(Clone, Debug)]
pub struct JobDefinition {
    pub name: String,
    pub schedule: ScheduleSpec,
    pub work: WorkUnit,
    pub settings: JobSettings,
}

impl JobDefinition {
    pub fn new(
        name: impl Into<String>,
        schedule: ScheduleSpec,
        work: WorkUnit,
        settings: JobSettings,
    ) -> Result<Self, JobError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(JobError::EmptyName);
        }
        if let WorkUnit::Shell(command) = &work {
            if command.trim().is_empty() {
                return Err(JobError::EmptyCommand(name));
            }
        }
        schedule.validate()?;
        Ok(Self {
            name,
            schedule,
            work,
            settings,
        })
    }

    pub fn lock_identity(&self) -> LockIdentity {
        self.settings.lock_identity(&self.name)
    }
}

/// One job's resolved configuration, as handed to the process that runs it.
///
/// Only shell jobs can be turned into tickets; the schedule stays behind
/// because the receiving process runs the job unconditionally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTicket {
    pub name: String,
    pub command: String,
    pub settings: JobSettings,
}

impl JobTicket {
    pub fn from_definition(job: &JobDefinition) -> Result<Self, JobError> {
        match &job.work {
            WorkUnit::Shell(command) => Ok(Self {
                name: job.name.clone(),
                command: command.clone(),
                settings: job.settings.clone(),
            }),
            WorkUnit::Callable(_) => Err(JobError::CallableNotTransferable(job.name.clone())),
        }
    }

    pub fn work(&self) -> WorkUnit {
        WorkUnit::Shell(self.command.clone())
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
