// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobby - per-host job scheduler

mod commands;
mod config;
mod env;
mod exit_error;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, run_job, tick};

#[derive(Parser)]
#[command(
    name = "jobby",
    version,
    about = "jobby - run scheduled jobs on this host, one instance at a time"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start every job due this minute (call once per minute from cron)
    Tick(tick::TickArgs),
    /// Validate the job file and show which jobs are due now
    Check(check::CheckArgs),
    /// Run a single job handed over by `tick`
    #[command(name = "run-job", hide = true)]
    RunJob(run_job::RunJobArgs),
}

#[tokio::main]
async fn main() {
    let _guard = match logging::setup_logging() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to set up logging: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, skipping the "Caused by" chain when the top-level
/// message already includes every cause.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Tick(args) => tick::handle(args).await,
        Commands::Check(args) => check::handle(args),
        Commands::RunJob(args) => run_job::handle(args).await,
    }
}

#[cfg(test)]
fn cli_command() -> clap::Command {
    use clap::CommandFactory;
    Cli::command()
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
