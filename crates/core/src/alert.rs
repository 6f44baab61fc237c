// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure alerts: where they go and what they say.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// An operator-facing channel that receives failure alerts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertTarget {
    Webhook {
        url: String,
    },
    Slack {
        url: String,
        channel: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender: Option<String>,
    },
    Mattermost {
        url: String,
    },
}

impl AlertTarget {
    pub fn url(&self) -> &str {
        match self {
            Self::Webhook { url } | Self::Slack { url, .. } | Self::Mattermost { url } => url,
        }
    }
}

impl fmt::Display for AlertTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Webhook { url } => write!(f, "webhook {}", url),
            Self::Slack { channel, .. } => write!(f, "slack #{}", channel.trim_start_matches('#')),
            Self::Mattermost { url } => write!(f, "mattermost {}", url),
        }
    }
}

/// A failure report for one job run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertMessage {
    pub job_name: String,
    pub host_name: String,
    /// Where the operator can find the job's output
    pub output_hint: String,
    pub body: String,
}

impl AlertMessage {
    pub fn new(job_name: &str, host_name: &str, output: Option<&Path>, message: &str) -> Self {
        let output_hint = output
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(no output file)".to_string());
        let body = format!(
            "{message}\n\nYou can find output for '{job_name}' in {output_hint} on {host_name}.\n\nBest,\njobby@{host_name}"
        );
        Self {
            job_name: job_name.to_string(),
            host_name: host_name.to_string(),
            output_hint,
            body,
        }
    }
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
