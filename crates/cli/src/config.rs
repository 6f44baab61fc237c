// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job file loading.
//!
//! ```toml
//! [dispatcher]
//! debug_log = "/var/log/jobby/debug.log"
//! mode = "detached"
//!
//! [defaults]
//! output = "/var/log/jobby/jobs.log"
//!
//! [jobs.backup]
//! schedule = "0 3 * * *"
//! command = "pg_dump app > /srv/backup/app.sql"
//! max_runtime = 3600
//! ```
//!
//! Jobs keep their file order. Per-job options override `[defaults]`, which
//! override the built-in defaults.

use crate::env;
use indexmap::IndexMap;
use jobby_core::{JobConfig, JobDefinition, JobError, JobSettings, ScheduleSpec, WorkUnit};
use jobby_engine::DispatchMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no job file given and no config directory found")]
    NoConfigPath,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Why a single job entry was not registered
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("{0}")]
    Format(#[from] toml::de::Error),
    #[error(transparent)]
    Job(#[from] JobError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DispatcherSection {
    pub debug_log: Option<PathBuf>,
    pub mode: DispatchMode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JobsFile {
    pub dispatcher: DispatcherSection,
    pub defaults: JobConfig,
    /// Raw entries, so one broken job does not reject the whole file
    pub jobs: IndexMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
pub struct JobEntry {
    pub schedule: String,
    pub command: String,
    #[serde(flatten)]
    pub config: JobConfig,
}

/// Jobs built from a file
#[derive(Debug, Default)]
pub struct Loaded {
    pub jobs: Vec<JobDefinition>,
    pub invalid: Vec<(String, EntryError)>,
}

/// Explicit path, else `$JOBBY_CONFIG`, else `<config dir>/jobby/jobs.toml`
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    explicit
        .map(Path::to_path_buf)
        .or_else(env::config_path)
        .or_else(|| dirs::config_dir().map(|dir| dir.join("jobby").join("jobs.toml")))
        .ok_or(ConfigError::NoConfigPath)
}

/// Defaults applied beneath `[defaults]`
pub fn builtin_defaults() -> JobConfig {
    JobConfig {
        environment: env::application_env(),
        ..JobConfig::default()
    }
}

impl JobsFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build and validate every job for `host`. Invalid entries are
    /// collected, not fatal.
    pub fn definitions(&self, host: &str, builtin: &JobConfig) -> Loaded {
        let defaults = self.defaults.clone().or(builtin);
        let mut loaded = Loaded::default();
        for (name, raw) in &self.jobs {
            match definition(name, raw, &defaults, host) {
                Ok(job) => loaded.jobs.push(job),
                Err(e) => loaded.invalid.push((name.clone(), e)),
            }
        }
        loaded
    }
}

fn definition(
    name: &str,
    raw: &toml::Value,
    defaults: &JobConfig,
    host: &str,
) -> Result<JobDefinition, EntryError> {
    let entry: JobEntry = raw.clone().try_into()?;
    let config = entry.config.or(defaults);
    let settings = JobSettings::resolve(&config, host)?;
    let schedule: ScheduleSpec = entry.schedule.parse().map_err(JobError::from)?;
    Ok(JobDefinition::new(
        name,
        schedule,
        WorkUnit::Shell(entry.command),
        settings,
    )?)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
