// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobby execution engine: job locks, the per-job executor and the dispatcher

mod dispatcher;
pub mod env;
mod error;
mod executor;
mod job_log;
mod lock;

pub use dispatcher::{
    DispatchMode, DispatchOutcome, Dispatcher, DispatcherConfig, TickReport, RUN_JOB_COMMAND,
};
pub use error::{DispatchError, LockError};
pub use executor::JobExecutor;
pub use job_log::JobLog;
pub use lock::{LockManager, LOCK_ATTEMPTS};
