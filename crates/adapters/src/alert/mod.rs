// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert senders
//!
//! Delivery transports live outside this crate; a sender here only has to
//! accept one message for one target.

mod logged;
mod noop;

pub use logged::LogAlertSender;
pub use noop::NoOpAlertSender;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AlertCall, FakeAlertSender};

use async_trait::async_trait;
use jobby_core::{AlertMessage, AlertTarget};
use thiserror::Error;

/// Errors from alert delivery
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("send to {target} failed: {reason}")]
    SendFailed { target: String, reason: String },
}

/// Delivers a failure message to one operator-facing channel
#[async_trait]
pub trait AlertSender: Clone + Send + Sync + 'static {
    async fn send(&self, target: &AlertTarget, message: &AlertMessage) -> Result<(), AlertError>;
}

/// Send `message` to every target.
///
/// Each target is tried independently: a failed delivery is logged and the
/// remaining targets still receive the message. Returns how many succeeded.
pub async fn notify_all<S: AlertSender>(
    sender: &S,
    targets: &[AlertTarget],
    message: &AlertMessage,
) -> usize {
    let mut delivered = 0;
    for target in targets {
        match sender.send(target, message).await {
            Ok(()) => {
                tracing::debug!(job = %message.job_name, %target, "alert delivered");
                delivered += 1;
            }
            Err(e) => {
                tracing::warn!(job = %message.job_name, %target, error = %e, "alert delivery failed");
            }
        }
    }
    delivered
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
