// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of one job execution.

use std::fmt;

/// How a single run of a job ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    /// A pre-flight check said no (disabled, halted, other host). Not an error.
    Skipped,
    /// Another instance holds the lock. Logged as info, never alerted.
    SoftFailure(String),
    /// Logged as an error and sent to the job's alert targets.
    Failure(String),
    Success,
}

impl ExecutionResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Message to record in the job log, if this outcome is logged at all
    pub fn log_line(&self) -> Option<String> {
        match self {
            Self::SoftFailure(msg) => Some(format!("INFO: {}", msg)),
            Self::Failure(msg) => Some(format!("ERROR: {}", msg)),
            Self::Skipped | Self::Success => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::SoftFailure(_) => "soft_failure",
            Self::Failure(_) => "failure",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SoftFailure(msg) | Self::Failure(msg) => write!(f, "{}: {}", self.kind(), msg),
            Self::Skipped | Self::Success => f.write_str(self.kind()),
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
