// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake alert sender for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AlertError, AlertSender};
use async_trait::async_trait;
use jobby_core::{AlertMessage, AlertTarget};
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded alert
#[derive(Debug, Clone)]
pub struct AlertCall {
    pub target: AlertTarget,
    pub message: AlertMessage,
}

#[derive(Default)]
struct FakeAlertState {
    calls: Vec<AlertCall>,
    failing_urls: Vec<String>,
}

/// Fake alert sender for testing
#[derive(Clone, Default)]
pub struct FakeAlertSender {
    inner: Arc<Mutex<FakeAlertState>>,
}

impl FakeAlertSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `url` fail (the attempt is still recorded)
    pub fn fail_for(&self, url: &str) {
        self.inner.lock().failing_urls.push(url.to_string());
    }

    /// Get all recorded alerts
    pub fn calls(&self) -> Vec<AlertCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl AlertSender for FakeAlertSender {
    async fn send(&self, target: &AlertTarget, message: &AlertMessage) -> Result<(), AlertError> {
        let mut inner = self.inner.lock();
        inner.calls.push(AlertCall {
            target: target.clone(),
            message: message.clone(),
        });
        if inner.failing_urls.iter().any(|u| u == target.url()) {
            return Err(AlertError::SendFailed {
                target: target.to_string(),
                reason: "configured to fail".to_string(),
            });
        }
        Ok(())
    }
}
