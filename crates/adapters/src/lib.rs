// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the host system: process launching and alert delivery

pub mod alert;
pub mod launcher;

pub use alert::{notify_all, AlertError, AlertSender, LogAlertSender, NoOpAlertSender};
pub use launcher::{DetachedLaunch, LaunchError, ProcessLauncher, SystemLauncher};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use alert::{AlertCall, FakeAlertSender};
#[cfg(any(test, feature = "test-support"))]
pub use launcher::FakeLauncher;
