// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert sender that records alerts in the process log.
//!
//! This is the sender the binary ships with. It hands every alert to
//! `tracing` at warn level with the target and the full body, so an operator
//! (or a log shipper) can route it onwards.

use super::{AlertError, AlertSender};
use async_trait::async_trait;
use jobby_core::{AlertMessage, AlertTarget};

#[derive(Clone, Copy, Debug, Default)]
pub struct LogAlertSender;

impl LogAlertSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertSender for LogAlertSender {
    async fn send(&self, target: &AlertTarget, message: &AlertMessage) -> Result<(), AlertError> {
        tracing::warn!(
            job = %message.job_name,
            host = %message.host_name,
            output = %message.output_hint,
            %target,
            url = target.url(),
            body = %message.body,
            "job alert"
        );
        Ok(())
    }
}
