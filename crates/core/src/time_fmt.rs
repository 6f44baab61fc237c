// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp formatting for job logs.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use thiserror::Error;

/// Default format for lifecycle log timestamps (`2026-01-30 08:14:09`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("invalid timestamp format '{0}'")]
    Invalid(String),
}

/// A validated strftime pattern.
///
/// chrono panics when rendering an invalid pattern, so patterns are checked
/// once when the job is registered. Offset and zone specifiers (`%z`, `%Z`)
/// parse fine but cannot render a naive wall-clock time, so they are caught
/// by rendering a sample instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimestampFormat(String);

impl TimestampFormat {
    pub fn parse(pattern: &str) -> Result<Self, TimeFormatError> {
        let invalid = pattern.is_empty()
            || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
        if invalid || try_render(pattern, NaiveDateTime::default()).is_none() {
            return Err(TimeFormatError::Invalid(pattern.to_string()));
        }
        Ok(Self(pattern.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render `at`, falling back to [`DEFAULT_TIMESTAMP_FORMAT`] if the
    /// pattern cannot be rendered.
    pub fn render(&self, at: NaiveDateTime) -> String {
        try_render(&self.0, at).unwrap_or_else(|| at.format(DEFAULT_TIMESTAMP_FORMAT).to_string())
    }
}

fn try_render(pattern: &str, at: NaiveDateTime) -> Option<String> {
    let mut buf = String::new();
    write!(buf, "{}", at.format(pattern)).ok()?;
    Some(buf)
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self(DEFAULT_TIMESTAMP_FORMAT.to_string())
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TimestampFormat {
    type Error = TimeFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimestampFormat> for String {
    fn from(value: TimestampFormat) -> Self {
        value.0
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
