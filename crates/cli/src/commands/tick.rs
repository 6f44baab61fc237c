// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jobby tick`

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use jobby_adapters::{LogAlertSender, ProcessLauncher, SystemLauncher};
use jobby_core::{Clock, SystemClock};
use jobby_engine::{DispatchMode, Dispatcher, DispatcherConfig, JobExecutor, LockManager};

use crate::config::{self, JobsFile};

#[derive(Args)]
pub struct TickArgs {
    /// Job file (default: $JOBBY_CONFIG, then <config dir>/jobby/jobs.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Run due jobs one after another in this process instead of detaching them
    #[arg(long)]
    pub foreground: bool,
}

pub async fn handle(args: TickArgs) -> Result<()> {
    let path = config::resolve_path(args.config.as_deref())?;
    let file = JobsFile::load(&path)?;
    let launcher = SystemLauncher::new();
    let loaded = file.definitions(&launcher.host_name(), &config::builtin_defaults());
    for (name, e) in &loaded.invalid {
        tracing::error!(job = %name, error = %e, "skipping invalid job");
    }

    let mode = if args.foreground {
        DispatchMode::Foreground
    } else {
        file.dispatcher.mode
    };
    let dispatcher_config = DispatcherConfig {
        program: std::env::current_exe().context("cannot locate the jobby binary")?,
        debug_log: file.dispatcher.debug_log.clone(),
        mode,
    };
    let executor = JobExecutor::new(
        LockManager::from_env(),
        launcher,
        LogAlertSender::new(),
        SystemClock,
    );
    let mut dispatcher = Dispatcher::new(dispatcher_config, executor);
    for job in loaded.jobs {
        let name = job.name.clone();
        if let Err(e) = dispatcher.add(job) {
            tracing::error!(job = %name, error = %e, "skipping job");
        }
    }

    let now = dispatcher.executor().clock().now();
    dispatcher.tick(now).await;
    Ok(())
}
