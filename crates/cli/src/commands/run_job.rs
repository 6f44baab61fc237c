// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jobby run-job`: the detached process started by `tick` for one job

use anyhow::{Context, Result};
use clap::Args;

use jobby_adapters::{LogAlertSender, SystemLauncher};
use jobby_core::{JobTicket, SystemClock};
use jobby_engine::{JobExecutor, LockManager};

use crate::exit_error::ExitError;

#[derive(Args)]
pub struct RunJobArgs {
    /// JSON job ticket
    #[arg(long)]
    pub ticket: String,
}

/// Runs the ticket's job once. Exits 1 when the run is a failure; skips and
/// lock contention exit 0.
pub async fn handle(args: RunJobArgs) -> Result<()> {
    let ticket = JobTicket::decode(&args.ticket).context("invalid job ticket")?;
    let mut executor = JobExecutor::new(
        LockManager::from_env(),
        SystemLauncher::new(),
        LogAlertSender::new(),
        SystemClock,
    );

    let result = executor.run_ticket(&ticket).await;
    if result.is_failure() {
        return Err(ExitError::new(1, format!("job '{}' {}", ticket.name, result)).into());
    }
    Ok(())
}
