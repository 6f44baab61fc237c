// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobby-core: data model and pure scheduling logic for the jobby scheduler

pub mod alert;
pub mod clock;
pub mod job;
pub mod lock_id;
pub mod outcome;
pub mod schedule;
pub mod task;
pub mod time_fmt;

pub use alert::{AlertMessage, AlertTarget};
pub use clock::{Clock, SystemClock};
pub use job::{JobConfig, JobDefinition, JobError, JobSettings, JobTicket, OutputPaths, WorkUnit};
pub use lock_id::{sanitize, LockIdentity};
pub use outcome::ExecutionResult;
pub use schedule::{is_due, ScheduleError, ScheduleSpec};
pub use task::{CallableTask, TaskResult};
pub use time_fmt::{TimeFormatError, TimestampFormat};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
