// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op alert sender.

use super::{AlertError, AlertSender};
use async_trait::async_trait;
use jobby_core::{AlertMessage, AlertTarget};

/// Alert sender that silently discards all alerts.
///
/// Used when alerting is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpAlertSender;

impl NoOpAlertSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertSender for NoOpAlertSender {
    async fn send(&self, _target: &AlertTarget, _message: &AlertMessage) -> Result<(), AlertError> {
        Ok(())
    }
}
