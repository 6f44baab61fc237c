// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jobby check`

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use std::path::PathBuf;

use jobby_adapters::{ProcessLauncher, SystemLauncher};
use jobby_core::{is_due, Clock, SystemClock, WorkUnit};

use crate::config::{self, JobsFile, Loaded};
use crate::exit_error::ExitError;

#[derive(Args)]
pub struct CheckArgs {
    /// Job file (default: $JOBBY_CONFIG, then <config dir>/jobby/jobs.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

/// Prints every job and whether it is due now. Exits 2 if any entry is invalid.
pub fn handle(args: CheckArgs) -> Result<()> {
    let path = config::resolve_path(args.config.as_deref())?;
    let file = JobsFile::load(&path)?;
    let loaded = file.definitions(&SystemLauncher::new().host_name(), &config::builtin_defaults());

    print!("{}", render(&loaded, SystemClock.now()));

    if !loaded.invalid.is_empty() {
        return Err(ExitError::new(
            2,
            format!(
                "{} invalid job(s) in {}",
                loaded.invalid.len(),
                path.display()
            ),
        )
        .into());
    }
    Ok(())
}

pub(crate) fn render(loaded: &Loaded, now: NaiveDateTime) -> String {
    let mut rows = vec![[
        "NAME".to_string(),
        "SCHEDULE".to_string(),
        "STATUS".to_string(),
        "COMMAND".to_string(),
    ]];
    for job in &loaded.jobs {
        let status = if !job.settings.enabled {
            "disabled".to_string()
        } else {
            match is_due(&job.schedule, now) {
                Ok(true) => "due".to_string(),
                Ok(false) => "-".to_string(),
                Err(e) => format!("error: {e}"),
            }
        };
        let command = match &job.work {
            WorkUnit::Shell(command) => command.clone(),
            WorkUnit::Callable(_) => "<callable>".to_string(),
        };
        rows.push([job.name.clone(), job.schedule.to_string(), status, command]);
    }

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for [name, schedule, status, command] in &rows {
        out.push_str(&format!(
            "{name:<w0$}  {schedule:<w1$}  {status:<w2$}  {command}\n",
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    }
    for (name, e) in &loaded.invalid {
        out.push_str(&format!("invalid job '{name}': {e}\n"));
    }
    out
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
